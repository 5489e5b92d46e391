mod catalog_test;
mod directory_box_test;
