pub mod errors;
pub mod packet;
pub mod profiles;
mod util;
