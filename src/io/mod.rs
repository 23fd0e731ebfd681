pub mod organize;
pub mod parents;
pub mod rename;

pub use organize::{OrganizeConfig, OrganizeReport, organize_files, tile_folder};
pub use parents::{ParentList, list_parents, parents_of};
pub use rename::{RenameConfig, RenameReport, rename_files, renamed_path};
