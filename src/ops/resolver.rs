use percent_encoding::percent_decode_str;
use tracing::{debug, warn};

use crate::catalog::{DISPLAY_NAME, MediaCatalog};
use crate::types::handle::StorageHandle;

/// Only handles with this scheme are catalog references.
pub const CATALOG_SCHEME: &str = "content";

/// Turns storage handles into display names through a [`MediaCatalog`].
///
/// Every failure collapses to `None`: foreign schemes (`file`, `http`, or a
/// handle that is not a URI at all), missing rows, empty names and catalog
/// errors alike.
pub struct HandleResolver {
    catalog: Box<dyn MediaCatalog>,
}

impl HandleResolver {
    pub fn new(catalog: impl MediaCatalog + 'static) -> Self {
        HandleResolver {
            catalog: Box::new(catalog),
        }
    }

    pub fn resolve(&self, handle: &StorageHandle) -> Option<String> {
        if handle.scheme().as_deref() != Some(CATALOG_SCHEME) {
            debug!(handle = handle.as_str(), "Not a catalog handle");
            return None;
        }

        let row = match self.catalog.query(handle, DISPLAY_NAME) {
            Ok(Some(row)) => row,
            Ok(None) => {
                debug!(handle = handle.as_str(), "No catalog row");
                return None;
            }
            Err(e) => {
                warn!(handle = handle.as_str(), error = %e, "Catalog query failed");
                return None;
            }
        };

        let stored = row.get(DISPLAY_NAME)?;
        last_path_segment(stored)
    }
}

/// Last non-empty `/` segment of a stored name, query and fragment excluded,
/// percent-decoded after the split.
///
/// `"folder/myclip.mp4"` gives `"myclip.mp4"`; `""` and `"/"` give `None`.
pub fn last_path_segment(name: &str) -> Option<String> {
    let path = name.split(['?', '#']).next().unwrap_or(name);
    path.rsplit('/')
        .find(|segment| !segment.is_empty())
        .map(|segment| percent_decode_str(segment).decode_utf8_lossy().into_owned())
}
