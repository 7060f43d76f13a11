pub mod errors;
pub mod job;
pub mod runner;
pub mod sanitize;
pub mod table;

use crate::errors::JobError;

pub fn run() -> Result<(), JobError> {
    runner::run()
}
