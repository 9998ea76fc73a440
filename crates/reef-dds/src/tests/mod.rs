//! Test suite for the publish/retrieve pipeline.

mod helpers;
