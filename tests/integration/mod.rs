//! Integration tests for flattening, querying and reconstructing trees

mod api_queries;
mod prefix_boundary;
mod properties;
mod round_trip;
mod search_scope;
mod store_seed;
mod support;
