use resource_enum::generate_resource_enum;

pub struct SampleEnumPackage;

#[generate_resource_enum]
impl SampleEnumPackage {
    #[target_resource]
    const RESOURCE_NAME: &str = "resource.message6";
}

pub struct SampleEnumSubPackageName;

#[generate_resource_enum(base_package = "", sub_package = "")]
impl SampleEnumSubPackageName {
    #[target_resource]
    const RESOURCE_NAME: &str = "resource.message6";
}

#[generate_resource_enum(base_package = "BASEPACKAGE")]
mod enum_base_package_name {
    #[target_resource]
    const RESOURCE_NAME: &str = "resource.message7";
}

#[generate_resource_enum(sub_package = "SUBPACKAGE")]
mod enum_sub_package_name {
    #[target_resource]
    const RESOURCE_NAME: &str = "resource.message8";
}

#[generate_resource_enum(base_package = "BasePackage", sub_package = "SubPackage2")]
pub trait EnumBaseSubPackageName {
    #[target_resource]
    const RESOURCE_NAME: &str = "resource.message9";
}
