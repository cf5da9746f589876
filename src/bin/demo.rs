use clap::Parser;
use dynarr::{AllocErr, DynArray};
use tracing_subscriber::EnvFilter;


/// Fills a `DynArray` with integers, rewrites them in place and prints them
/// forwards and backwards.
#[derive(Parser, Debug)]
#[command(name = "dynarr-demo")]
#[command(version, about, long_about = None)]
struct Cli {
    /// How many integers to append
    #[arg(short = 'n', long, default_value_t = 10)]
    count: i64,

    /// Initial capacity; zero or omitted uses the default
    #[arg(short, long)]
    capacity: Option<usize>,
}

fn main() -> Result<(), AllocErr> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    let mut arr = match cli.capacity {
        Some(capacity) => DynArray::try_with_capacity(capacity)?,
        None => DynArray::try_new()?,
    };
    for i in 0..cli.count {
        arr.try_push(i + 1)?;
    }
    tracing::info!(len = arr.len(), capacity = arr.capacity(), "filled");

    for i in 0..arr.len() {
        arr[i] *= 2;
    }

    let mut cursor = arr.cursor();
    while cursor.has_next() {
        println!("{}", cursor.get());
        cursor.advance();
    }

    let mut cursor = arr.cursor_mut();
    while cursor.has_next() {
        let value = *cursor.get();
        cursor.set(value + 2);
        cursor.advance();
    }

    for value in arr.reverse_cursor() {
        println!("{value}");
    }

    Ok(())
}
