#![allow(dead_code)]

pub use wingbridge_test_utils::builders;
pub use wingbridge_test_utils::fake_enumerator::FakeProcessEnumerator;
pub use wingbridge_test_utils::fake_runner::{FakeCommandRunner, FakeResponse, Invocation};
pub use wingbridge_test_utils::init_tracing;
pub use wingbridge_test_utils::fake_host::{EventLog, FakeFinder, FakeHost, FakeModule, event_log};
