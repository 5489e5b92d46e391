mod box_source_test;
mod registry_test;
