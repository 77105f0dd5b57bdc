mod application;

mod presentation {
    pub mod cli;
}

use asbatch_core::error::Result;

fn main() -> Result<()> {
    application::run()
}
