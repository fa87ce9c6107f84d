//! Forecast a production series through the calculation service.

use clap::Args;
use dca_core::decline::DeclineType;
use dca_workflow::{
    orchestrator::{Completion, CALCULATION_FAILED},
    plot,
    selection::SelectionOutcome,
    session::{Forecast, WorkflowSession},
};
use log::info;

use crate::{config::ServiceConfig, export};

#[derive(Args, Debug, Clone)]
pub struct ForecastArgs {
    /// Production CSV with 'Date' and 'FlowRate' columns
    #[arg(short = 'i', long)]
    pub input: String,

    /// Index of the first anchor point (sent as t1)
    #[arg(long)]
    pub t1: usize,

    /// Index of the second anchor point (sent as t2)
    #[arg(long)]
    pub t2: usize,

    /// Decline model: exponential, hyperbolic or harmonic
    #[arg(short = 'd', long, default_value_t = DeclineType::Exponential)]
    pub decline_type: DeclineType,

    /// Economic limit qf in STB/d
    #[arg(long, default_value = "5")]
    pub qf: String,

    /// Write the forecast curve to this CSV file
    #[arg(short = 'e', long)]
    pub export: Option<String>,

    /// Write the composed chart traces to this JSON file
    #[arg(long)]
    pub traces: Option<String>,

    #[command(flatten)]
    pub service: ServiceConfig,
}

/// Run the full workflow: import, pick both anchors, forecast, report.
pub async fn run_forecast(args: ForecastArgs) -> anyhow::Result<()> {
    let csv_data = tokio::fs::read_to_string(&args.input).await?;
    let mut session = WorkflowSession::new();
    let dropped = session.import_csv(&csv_data)?;
    info!("Loaded {} ({} rows dropped)", args.input, dropped);

    select_anchors(&mut session, args.t1, args.t2)?;
    session.set_decline_type(args.decline_type);
    session.set_cutoff_text(&args.qf);

    let client = args.service.client()?;
    match session.run_forecast(&client).await? {
        Completion::Applied => {}
        Completion::Failed(e) => anyhow::bail!("{} ({})", CALCULATION_FAILED, e),
        Completion::Stale => anyhow::bail!("Forecast response no longer matches the loaded data"),
    }

    let Some(forecast) = session.forecast() else {
        anyhow::bail!("No forecast available");
    };
    print!("{}", format_volumes(forecast));

    if let Some(path) = &args.export {
        export::write_curve_csv(path, &forecast.result.curve)?;
    }
    if let Some(path) = &args.traces {
        std::fs::write(path, plot::to_json(&session.traces())?)?;
        info!("Wrote chart traces to {}", path);
    }
    Ok(())
}

/// Pick `t1` then `t2` on the imported series.
pub fn select_anchors(session: &mut WorkflowSession, t1: usize, t2: usize) -> anyhow::Result<()> {
    let len = session.series().map(|s| s.len()).unwrap_or(0);
    for index in [t1, t2] {
        match session.select_index(index) {
            SelectionOutcome::Appended => {}
            SelectionOutcome::Unchanged => {
                anyhow::bail!("Anchor {} selected twice; pick two distinct points", index)
            }
            _ => anyhow::bail!(
                "Anchor {} is outside the series (valid indices: 0..{})",
                index,
                len
            ),
        }
    }
    Ok(())
}

/// Volume summary as shown on the result cards.
pub fn format_volumes(forecast: &Forecast) -> String {
    let result = &forecast.result;
    format!(
        "Model: {}  qf: {}\nHistorical Production: {:.2} MMbbl\nForecasted Production: {:.2} MMbbl\nTotal EUR: {:.2} MMbbl\n",
        forecast.settings.decline_type.label(),
        forecast.settings.cutoff,
        result.observed_volume,
        result.extrapolated_volume,
        result.total_volume
    )
}
