//! avdeploy unit tests

mod support;
mod test_store;
