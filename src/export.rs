use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use crate::flow::FlowDiagram;

/// Write the diagram's links as `source,target,value` rows.
/// Returns the number of links written.
pub(crate) fn write_flow_csv(path: &Path, diagram: &FlowDiagram) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let count = write_flow_csv_to(file, diagram)?;
    tracing::info!(path = %path.display(), count, "flow exported");
    Ok(count)
}

pub(crate) fn write_flow_csv_to<W: Write>(writer: W, diagram: &FlowDiagram) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["source", "target", "value"])
        .context("Failed to write CSV header")?;
    let links = diagram.labeled_links();
    for (source, target, value) in &links {
        wtr.write_record([*source, *target, value.to_string().as_str()])
            .context("Failed to write CSV row")?;
    }
    wtr.flush().context("Failed to flush CSV output")?;
    Ok(links.len())
}
