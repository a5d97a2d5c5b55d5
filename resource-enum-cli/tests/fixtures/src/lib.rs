//! Marked declarations scanned by the integration tests.

use resource_enum::generate_resource_enum;

mod packagetest;

#[generate_resource_enum]
mod sample_enum {
    #[target_resource]
    const RESOURCE_NAME: &str = "resource.message";
}

#[generate_resource_enum]
mod missing_target {
    #[allow(dead_code)]
    const RESOURCE_NAME: &str = "resource.message";
}

/// Not marked; never reaches a generator.
mod unmarked {
    #[allow(dead_code)]
    const RESOURCE_NAME: &str = "resource.message2";
}
