use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tbridge_convert::{AttributeToVector, ConversionContext};
use tbridge_io::{ClassIndex, read_dataset};
use tbridge_model::{AttributeDataset, WEIGHT_COLUMN};
use tracing::{debug, info_span};

use tbridge_cli::output::{
    RoundTrip, VectorFormat, render_vectors, verify_roundtrip, write_output,
};

use crate::cli::{ConvertArgs, InspectArgs, OutputFormatArg};

/// Everything `inspect` prints.
pub struct InspectReport {
    pub dataset: AttributeDataset,
    pub context: ConversionContext,
    /// Rendered preview table, when requested.
    pub preview: Option<String>,
}

/// Outcome of `convert`.
pub struct ConvertSummary {
    pub input: PathBuf,
    pub relation: String,
    pub records: usize,
    pub context: ConversionContext,
    pub output: Option<PathBuf>,
    pub roundtrip: Option<RoundTrip>,
}

impl ConvertSummary {
    pub fn has_errors(&self) -> bool {
        self.roundtrip
            .as_ref()
            .is_some_and(|roundtrip| !roundtrip.is_exact())
    }
}

impl From<OutputFormatArg> for VectorFormat {
    fn from(format: OutputFormatArg) -> Self {
        match format {
            OutputFormatArg::Text => Self::Text,
            OutputFormatArg::Csv => Self::Csv,
            OutputFormatArg::Json => Self::Json,
        }
    }
}

fn load(path: &Path, class: &ClassIndex) -> Result<AttributeDataset> {
    read_dataset(path, class).with_context(|| format!("load {}", path.display()))
}

pub fn run_inspect(args: &InspectArgs) -> Result<InspectReport> {
    let path = &args.input.input;
    let span = info_span!("inspect", input = %path.display());
    let _guard = span.enter();

    let dataset = load(path, &args.input.class)?;
    let context = ConversionContext::from_schema(dataset.schema()).context("classify attributes")?;
    let preview = match args.preview {
        Some(rows) => {
            let frame = dataset.to_dataframe().context("build preview frame")?;
            let frame = frame
                .drop(WEIGHT_COLUMN)
                .context("drop weight column")?;
            Some(frame.head(Some(rows)).to_string())
        }
        None => None,
    };

    Ok(InspectReport {
        dataset,
        context,
        preview,
    })
}

pub fn run_convert(args: &ConvertArgs) -> Result<ConvertSummary> {
    let path = &args.input.input;
    let span = info_span!("convert", input = %path.display());
    let _guard = span.enter();

    let dataset = load(path, &args.input.class)?;
    let mut converter = AttributeToVector::new();
    converter
        .initialize(dataset.schema())
        .context("initialize converter")?;
    let vectors = converter
        .convert_dataset(&dataset)
        .context("convert dataset")?;

    let rendered = render_vectors(&vectors, args.format.into())?;
    write_output(args.output.as_deref(), &rendered)?;
    debug!(bytes = rendered.len(), "rendered vector dataset");

    let context = converter.context()?.clone();
    let roundtrip = if args.roundtrip {
        Some(verify_roundtrip(&dataset, &context, &vectors)?)
    } else {
        None
    };

    Ok(ConvertSummary {
        input: path.clone(),
        relation: dataset.schema().name().to_string(),
        records: vectors.len(),
        context,
        output: args.output.clone(),
        roundtrip,
    })
}
