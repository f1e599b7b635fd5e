use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Parse CREATE TABLE statements into the JSON table model
    Parse {
        #[arg(help = "DDL file path")]
        file: String,

        #[arg(
            long,
            help = "Parse every CREATE TABLE in the file and print a per-statement report"
        )]
        batch: bool,

        #[arg(long, help = "If specified, writes the JSON to this file instead of stdout")]
        output: Option<String>,
    },
    /// Generate SQL for one table or a list of tables
    Generate {
        #[arg(help = "JSON table model (a table or an array of tables)")]
        file: String,

        #[arg(long, help = "Treat the input file as DDL and parse it first")]
        from_ddl: bool,

        /// Target dialect: "mysql", "postgresql" or "sqlite"
        #[arg(long)]
        dialect: Option<String>,

        #[arg(long, help = "Generation options JSON file")]
        options: Option<String>,

        #[arg(long, help = "If specified, writes the SQL to this file instead of stdout")]
        output: Option<String>,
    },
    /// Print the ALTER TABLE statements that turn one table into another
    Diff {
        #[arg(help = "Current table")]
        old: String,

        #[arg(help = "Desired table")]
        new: String,

        #[arg(long, help = "Treat both files as DDL and parse them first")]
        from_ddl: bool,

        /// Target dialect: "mysql", "postgresql" or "sqlite"
        #[arg(long)]
        dialect: Option<String>,

        #[arg(long, help = "Generation options JSON file")]
        options: Option<String>,
    },
}
