use structopt::{
    clap::AppSettings,
    StructOpt,
};

#[derive(StructOpt, Debug)]
#[structopt(
    name = "rpn-run",
    about = "Deferred evaluation RPN calculator",
    setting = AppSettings::AllowNegativeNumbers,
)]
pub struct Options {
    /// Fractional digits kept while calculating.
    #[structopt(long = "precision", default_value = "15")]
    pub precision: u32,

    /// Fractional digits shown when printing the stack.
    #[structopt(long = "display-precision", default_value = "10")]
    pub display_precision: u32,

    /// File the line editor history is loaded from and saved to.
    #[structopt(long = "history", default_value = "./rpn-run-history.txt")]
    pub history: String,

    /// Evaluate these tokens once and exit instead of starting the prompt.
    #[structopt(allow_hyphen_values = true)]
    pub tokens: Vec<String>,
}
