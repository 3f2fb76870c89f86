//! Integration test harness — end-to-end control flows over mock hardware.

mod controller_flow_tests;
mod mock_hw;
