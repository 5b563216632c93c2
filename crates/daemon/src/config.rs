#[derive(Clone, Debug)]
pub struct Config {
    pub listen: String,
    pub db_url: String,
    pub ns: String,
    pub db: String,
}

impl Config {
    pub fn from_args() -> Self {
        use clap::Parser;

        #[derive(Parser, Debug)]
        #[command(name = "employee-daemon", version, about = "Employee management REST daemon")]
        struct Args {
            /// Where the HTTP API will listen, e.g. 127.0.0.1:8080
            #[arg(long, default_value = "127.0.0.1:8080")]
            listen: String,

            /// Store url: `surrealkv://<dir>` for the embedded engine, or
            /// `mem://` for a throwaway in-memory store.
            #[arg(long, default_value = "surrealkv://.employees/db")]
            db_url: String,

            #[arg(long, default_value = "employees")]
            ns: String,

            #[arg(long, default_value = "main")]
            db: String,
        }

        let a = Args::parse();
        Self {
            listen: a.listen,
            db_url: a.db_url,
            ns: a.ns,
            db: a.db,
        }
    }
}
