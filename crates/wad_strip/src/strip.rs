use std::time::Instant;

use wad_io::Wad;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::liveness::{analyze, Source};
use crate::options::StripOptions;
use crate::rebuild::{rebuild, Rebuilt};

/// Strip `overlay` of every texture, patch and flat that neither container's
/// maps can reach, using `base` as the read-only liveness baseline.
pub fn strip(base: &Wad, overlay: &Wad, options: &StripOptions) -> Result<Rebuilt> {
    let start = Instant::now();

    tracing::info!("Loading base catalog");
    let base_catalog = Catalog::load(base)?;
    tracing::info!("Loading overlay catalog");
    let overlay_catalog = Catalog::load(overlay)?;

    let analysis = analyze(
        Source::new(base, &base_catalog),
        Source::new(overlay, &overlay_catalog),
        options,
    )?;

    tracing::info!("Rebuilding overlay");
    let rebuilt = rebuild(overlay, &overlay_catalog, &analysis, options)?;

    let report = &rebuilt.report;
    tracing::info!(
        "Strip complete lumps_kept={} lumps_removed={} textures_removed={} patch_names_removed={} saved_bytes={} elapsed_ms={}",
        report.lumps_kept,
        report.removed_lumps.len() + report.private_lumps.len(),
        report.textures_removed,
        report.patch_names_removed,
        report.bytes_saved(),
        start.elapsed().as_millis()
    );

    Ok(rebuilt)
}
