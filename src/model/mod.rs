//! Data model for scrape jobs
//!
//! # Components
//!
//! - `FacultyStub`: a raw entry extracted from a listing page
//! - `FacultyRecord`: a stub plus enrichment fields, as returned to callers
//! - `PageResult`: one fetch-and-extract cycle's outcome
//! - `JobResult`: the full job outcome with partial-failure counters
//!
//! Nothing here outlives the job that produced it.

mod job;
mod page;
mod record;

pub use job::{CollegeContacts, JobResult, JobStatus};
pub use page::{PageResult, PageStatus, Termination};
pub use record::{EnrichmentStatus, EntrySource, FacultyRecord, FacultyStub};
