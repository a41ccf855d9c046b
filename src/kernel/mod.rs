/// Kernel initialization and boot sequence
pub mod boot;
#[cfg(target_arch = "x86_64")]
pub mod init;

pub use boot::run;
#[cfg(target_arch = "x86_64")]
pub use init::init_kernel;
