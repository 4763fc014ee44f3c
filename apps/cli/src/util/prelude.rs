pub use crate::print_output;
pub use crate::util::output::report_notices;
