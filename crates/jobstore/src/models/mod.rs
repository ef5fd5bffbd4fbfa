//! Entity gateway: model types that execute the constructed queries.

mod company;
mod job;

pub use company::{Company, CompanyPatch, NewCompany};
pub use job::{Job, JobPatch, NewJob};
