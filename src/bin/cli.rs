//! JRPC CLI Client
//!
//! Command-line interface for poking at a console over the debug protocol.

use clap::{Parser, Subcommand};
use jrpc::protocol::{decode_hex, parse_address};
use jrpc::{Argument, Config, Console, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// JRPC CLI
#[derive(Parser, Debug)]
#[command(name = "jrpc-cli")]
#[command(about = "Remote memory and call client for the console debug protocol")]
#[command(version)]
struct Args {
    /// Console address
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Console debug port
    #[arg(short, long, default_value = "730")]
    port: u16,

    /// Log every command/response exchange
    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Read memory
    Peek {
        /// Address (hex, `0x` optional)
        address: String,

        /// Number of bytes
        length: u32,
    },

    /// Write hex bytes to memory
    Poke {
        /// Address (hex, `0x` optional)
        address: String,

        /// Data as hex, e.g. 60000000
        data: String,
    },

    /// Write one or more big-endian floats
    Float {
        /// Address (hex, `0x` optional)
        address: String,

        /// Values, written back to back
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f32>,
    },

    /// Call a function
    Call {
        /// Function address (hex, `0x` optional)
        address: String,

        /// Integer arguments
        #[arg(allow_negative_numbers = true)]
        args: Vec<i64>,
    },

    /// Resolve a module export by ordinal
    Resolve {
        /// Module name, e.g. xam.xex
        module: String,

        /// Export ordinal
        ordinal: u32,
    },
}

fn main() {
    let args = Args::parse();

    // Initialize tracing/logging
    let default_filter = if args.debug { "info,jrpc=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt().with_env_filter(filter).with_target(true).init();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = Config::builder()
        .address(&args.host)
        .port(args.port)
        .debug(args.debug)
        .build();

    let mut console = Console::connect(config)?;
    tracing::info!("Connected to {}:{}", args.host, args.port);

    match args.command {
        Commands::Peek { address, length } => {
            match console.read_memory(parse_address(&address)?, length)? {
                Some(data) => println!("{}", String::from_utf8_lossy(&data)),
                None => println!("(no data)"),
            }
        }
        Commands::Poke { address, data } => {
            let bytes = decode_hex(&data)?;
            let ok = console.write_memory(parse_address(&address)?, &bytes)?;
            println!("{}", if ok { "OK" } else { "FAILED" });
        }
        Commands::Float { address, values } => {
            let ok = console.write_float_array(parse_address(&address)?, &values)?;
            println!("{}", if ok { "OK" } else { "FAILED" });
        }
        Commands::Call { address, args } => {
            let args: Vec<Argument> = args.into_iter().map(Argument::from).collect();
            let response = console.call(parse_address(&address)?, &args)?;
            println!("{}", response.text().trim_end());
        }
        Commands::Resolve { module, ordinal } => {
            let address = console.resolve_function(&module, ordinal)?;
            println!("0x{:08X}", address);
        }
    }

    console.close();
    Ok(())
}
