//! Integration tests for reading result sets from async streams

use pretty_assertions::assert_eq;
use tokio::io::AsyncRead;
use zero_clickhouse::error::Error;
use zero_clickhouse::tokio::Rows;
use zero_clickhouse::{CancelHook, Opts, Value, ValueKind};

async fn collect<R: AsyncRead + Unpin>(rows: &mut Rows<R>) -> Vec<Vec<Value>> {
    let mut out = Vec::new();
    let mut row = vec![Value::Null; rows.column_count()];
    while rows.next(&mut row).await.expect("next row") {
        out.push(row.clone());
    }
    out
}

#[tokio::test]
async fn test_round_trip() {
    let input: &[u8] = b"a\tb\nInt32\tString\n1\tx\n-2\ty\n";
    let mut rows = Rows::open(input, &Opts::default()).await.unwrap();

    assert_eq!(rows.column_names(), vec!["a", "b"]);
    assert_eq!(rows.value_kind(0), Some(ValueKind::Int32));
    assert_eq!(
        collect(&mut rows).await,
        vec![
            vec![Value::Int32(1), Value::String("x".to_string())],
            vec![Value::Int32(-2), Value::String("y".to_string())],
        ]
    );

    let mut row = vec![Value::Null; 2];
    assert!(!rows.next(&mut row).await.unwrap());
}

#[tokio::test]
async fn test_totals_and_small_buffer() {
    let input: &[u8] = b"k\tn\r\nString\tNullable(UInt16)\r\nlong-key-value\t\\N\r\n\r\n\t9\r\n";
    let opts = Opts {
        read_buffer_size: 3,
        ..Opts::default()
    };
    let mut rows = Rows::open(input, &opts).await.unwrap();
    assert_eq!(
        collect(&mut rows).await,
        vec![
            vec![Value::String("long-key-value".to_string()), Value::Null],
            vec![Value::String(String::new()), Value::UInt16(9)],
        ]
    );
}

#[tokio::test]
async fn test_duplex_stream() {
    let (mut client, server) = tokio::io::duplex(8);
    let writer = tokio::spawn(async move {
        use tokio::io::AsyncWriteExt;
        client
            .write_all(b"id\tv\nUInt8\tArray(Int8)\n1\t[1,2]\n2\t[]\n")
            .await
            .unwrap();
    });

    let mut rows = Rows::open(server, &Opts::default()).await.unwrap();
    assert_eq!(
        collect(&mut rows).await,
        vec![
            vec![
                Value::UInt8(1),
                Value::Array(vec![Value::Int8(1), Value::Int8(2)]),
            ],
            vec![Value::UInt8(2), Value::Array(vec![])],
        ]
    );
    writer.await.unwrap();
}

#[tokio::test]
async fn test_errors() {
    let opts = Opts::default();
    assert!(matches!(
        Rows::open(&b""[..], &opts).await,
        Err(Error::MissingHeader("column names"))
    ));
    assert!(matches!(
        Rows::open(&b"a\n"[..], &opts).await,
        Err(Error::MissingHeader("column types"))
    ));

    let mut rows = Rows::open(&b"a\nUInt8\n300\n"[..], &opts).await.unwrap();
    let mut row = vec![Value::Null];
    assert!(matches!(rows.next(&mut row).await, Err(Error::ParseError { .. })));

    let mut rows = Rows::open(&b"a\nUInt8\n3\n"[..], &opts).await.unwrap();
    let mut row = Vec::new();
    assert!(matches!(rows.next(&mut row).await, Err(Error::BadUsageError(_))));
}

#[tokio::test]
async fn test_close_clears_cancel_hook() {
    let hook = CancelHook::new();
    hook.set(|| {});
    let rows = Rows::open(&b"a\nString\n"[..], &Opts::default())
        .await
        .unwrap()
        .with_cancel_hook(hook.clone());

    rows.close();
    assert!(!hook.is_set());
    assert!(!hook.cancel());
}
