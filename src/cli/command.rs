use clap::Subcommand;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[command(
        about = "Serve the REST API (default)",
        long_about = "Start the HTTP server exposing the sales list and aggregation endpoints."
    )]
    Serve,
    #[command(
        about = "Fill the database with random products and sales",
        long_about = "Create random products, then random sales records that cycle over every stored product. Sale dates fall between 2022-01-01 and now."
    )]
    Populate {
        #[arg(
            long,
            default_value_t = 200usize,
            value_name = "N",
            help = "Number of products to create"
        )]
        products: usize,
        #[arg(
            long,
            default_value_t = 10_000usize,
            value_name = "N",
            help = "Number of sales records to create"
        )]
        records: usize,
    },
}
