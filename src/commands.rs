use clap::{Parser, Subcommand, command};

#[derive(Parser)]
#[command(name = "peoplers", about = "Generate, filter and marry random people")]
pub struct Args {
    /// Seed for the random generator, OS entropy when omitted
    #[arg(long, global = true, env = "PEOPLE_SEED")]
    pub seed: Option<u64>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate random people and print them
    Generate {
        /// The number of people to generate
        #[arg(allow_negative_numbers = true)]
        count: i64,
    },
    /// Generate random people and print the ones matching a name and age
    Filter {
        /// The number of people to generate before filtering
        #[arg(allow_negative_numbers = true)]
        count: i64,
        /// Name to keep
        #[arg(long, default_value = "Bob")]
        name: String,
        /// Age threshold in years
        #[arg(long, default_value_t = 30)]
        threshold: u32,
        /// Keep people younger than the threshold instead of older
        #[arg(long)]
        younger: bool,
    },
    /// Print the married name of a person
    Marry {
        /// First name of the person
        name: String,
        /// Last name to apply
        last_name: String,
    },
}
