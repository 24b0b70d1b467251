//! Decode a TabSeparatedWithNamesAndTypes response from stdin and print each row.
//!
//! ```sh
//! curl -s 'http://localhost:8123/?query=SELECT+number,+toString(number)+FROM+numbers(5)+FORMAT+TabSeparatedWithNamesAndTypes' \
//!     | cargo run --example dump_tsv -- 'http://localhost:8123/?use_db_location=true'
//! ```

use zero_clickhouse::error::Result;
use zero_clickhouse::sync::Rows;
use zero_clickhouse::{Opts, Value};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let opts = match std::env::args().nth(1) {
        Some(url) => Opts::try_from(url.as_str())?,
        None => Opts::default(),
    };

    let stdin = std::io::stdin().lock();
    let mut rows = Rows::open(stdin, &opts)?;

    for (i, col) in rows.columns().iter().enumerate() {
        println!("#{} {}: {} ({})", i, col.name(), col.type_name(), col.value_kind());
    }

    let mut row = vec![Value::Null; rows.column_count()];
    let mut count = 0;
    while rows.next(&mut row)? {
        println!("{:?}", row);
        count += 1;
    }
    println!("{} rows", count);

    rows.close();
    Ok(())
}
