use image_tokens::consts::LITELLM_PRICING_URL;
use image_tokens::{CachedSource, DiskCache, LiteLlmSource, PriceSource, PricingDb};

use crate::cli::{Cli, Commands, ImageSpec};
use crate::output::{
    NumberFormat, TableOptions, output_estimate_json, output_models_json, print_estimate_table,
    print_models_table,
};
use crate::report::EstimateReport;

pub(crate) struct CommandContext<'a> {
    pub(crate) cli: &'a Cli,
    pub(crate) pricing_db: &'a PricingDb,
    pub(crate) number_format: NumberFormat,
}

impl CommandContext<'_> {
    fn table_options(&self) -> TableOptions {
        TableOptions {
            use_color: self.cli.use_color(),
            show_cost: self.cli.show_cost(),
            number_format: self.number_format,
        }
    }
}

/// Build the price source chain: remote LiteLLM document behind the disk cache
fn price_source(cli: &Cli) -> Option<Box<dyn PriceSource>> {
    let url = cli
        .pricing_url
        .clone()
        .unwrap_or_else(|| LITELLM_PRICING_URL.to_string());
    let cache_path = cli.cache_path.clone().or_else(DiskCache::default_path)?;
    let source = CachedSource::new(Box::new(LiteLlmSource::new(url)), DiskCache::new(cache_path))
        .offline(cli.offline);
    Some(Box::new(source))
}

/// Load prices unless costs are hidden; a failed load leaves every cost at zero
pub(crate) fn load_pricing(cli: &Cli, pricing_db: &PricingDb) {
    if !cli.show_cost() {
        return;
    }
    match price_source(cli) {
        Some(source) => pricing_db.initialize(source.as_ref()),
        None => tracing::warn!("no home directory; pricing cache unavailable"),
    }
}

fn handle_estimate(images: &[ImageSpec], ctx: &CommandContext<'_>) {
    let report = EstimateReport::build(
        images,
        ctx.cli.model(),
        ctx.cli.detail(),
        ctx.pricing_db,
    );
    if ctx.cli.json {
        println!("{}", output_estimate_json(&report, ctx.cli.show_cost()));
    } else {
        print_estimate_table(&report, ctx.table_options());
    }
}

fn handle_models(ctx: &CommandContext<'_>) {
    if ctx.cli.json {
        println!("{}", output_models_json(ctx.pricing_db, ctx.cli.show_cost()));
    } else {
        print_models_table(ctx.pricing_db, ctx.table_options());
    }
}

pub(crate) fn handle_command(ctx: &CommandContext<'_>) {
    match &ctx.cli.command {
        Commands::Estimate { images } => handle_estimate(images, ctx),
        Commands::Models => handle_models(ctx),
    }
}
