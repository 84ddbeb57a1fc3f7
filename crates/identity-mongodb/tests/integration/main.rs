//! Live tests against a MongoDB server named by `IDENTITY_MONGODB_TEST_URL`.
//! Each test skips itself when the variable is unset.

mod role_store_test;
