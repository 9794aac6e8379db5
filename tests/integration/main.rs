//! Integration tests for College Leads
//!
//! These tests use wiremock to serve faculty listings, homepages and search
//! results, and run full jobs end-to-end.

mod enrichment_tests;
mod job_tests;
mod pagination_tests;
mod resolution_tests;
mod support;
