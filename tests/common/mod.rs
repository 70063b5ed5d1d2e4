//! Common test utilities and mock implementations

pub mod mock_interface;

#[allow(unused_imports)]
pub use mock_interface::{MockInterface, Operation, RecordingDelay};
#[allow(unused_imports)]
pub use test_utils::{assert_float_eq, create_initialized_driver, create_mock_driver};
