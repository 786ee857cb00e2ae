//! CLI subcommand definitions

use std::str::FromStr;

use clap::Subcommand;
use image_tokens::{AppError, DetailLevel, ImageDimensions};

/// Main CLI commands
#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Estimate tokens and cost for one or more images
    Estimate {
        /// Image sizes as WIDTHxHEIGHT, optionally with a per-image detail
        /// level (e.g. 1024x768 or 4096x2048:low)
        #[arg(required = true, value_name = "WxH[:DETAIL]")]
        images: Vec<ImageSpec>,
    },
    /// List supported models and how they are billed
    Models,
}

/// One image on the command line
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ImageSpec {
    pub(crate) dimensions: ImageDimensions,
    pub(crate) detail: Option<DetailLevel>,
}

impl FromStr for ImageSpec {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((dims, detail)) => Ok(Self {
                dimensions: dims.parse()?,
                detail: Some(detail.parse()?),
            }),
            None => Ok(Self {
                dimensions: s.parse()?,
                detail: None,
            }),
        }
    }
}
