use clap::ValueEnum;
use vidscout::search::Facet;

/// Output formats for the search outcome.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Plain,
    Json,
}

/// Facet names accepted by `--types`, matching the shareable link spelling.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum FacetArg {
    Titles,
    Descriptions,
    Transcripts,
}

impl FacetArg {
    pub(crate) fn facet(self) -> Facet {
        match self {
            FacetArg::Titles => Facet::Titles,
            FacetArg::Descriptions => Facet::Descriptions,
            FacetArg::Transcripts => Facet::Segments,
        }
    }
}
