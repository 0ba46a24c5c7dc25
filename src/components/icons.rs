//! Centralized icon definitions.
//!
//! Maps semantic icon names to the Bootstrap icon set so components never
//! reference a concrete icon crate constant directly.

use icondata::Icon;

pub const SHARE: Icon = icondata::BsShare;
pub const DOWNLOAD: Icon = icondata::BsDownload;
pub const PLUS: Icon = icondata::BsPlusLg;
pub const CLOSE: Icon = icondata::BsXLg;
