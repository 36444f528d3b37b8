/// Module graph bounded context
///
/// Pure domain logic: the multi-version dependency graph reconstructed
/// from `go mod graph` output and the services that build and query it.
/// Nothing in here performs I/O.
pub mod domain;
pub mod services;
