//! Unit tests for configuration loading and precedence.
//!
//! - `helpers`: Shared test utilities
//! - `precedence`: Layer precedence tests
//! - `field_resolution`: Token, repository, number and locator resolution
//! - `loading`: Environment and CLI loading through ortho-config
//! - `validation`: Configuration consistency validation tests

mod helpers;
