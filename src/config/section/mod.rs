//! One module per `huodong.toml` table.
//!
//! | Module    | TOML Section | Purpose                             |
//! |-----------|--------------|-------------------------------------|
//! | `site`    | `[site]`     | Library metadata for the index      |
//! | `content` | `[content]`  | Activity directory and extensions   |
//! | `build`   | `[build]`    | Output paths, index artifact        |
//! | `check`   | `[check]`    | Schema check strictness             |
//! | `watch`   | `[watch]`    | Rebuild debounce timing             |

mod build;
mod check;
mod content;
mod site;
mod watch;

pub use build::BuildSection;
pub use check::CheckSection;
pub use content::ContentSection;
pub use site::SiteSection;
pub use watch::WatchSection;
