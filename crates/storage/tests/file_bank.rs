use std::path::PathBuf;

use storage::{BankSource, FileBank, StorageError};

fn scratch_file(name: &str, contents: &[u8]) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("quiz-storage-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[tokio::test]
async fn file_bank_reads_whole_text() {
    let path = scratch_file("bank.txt", "Q1=====a=====#b+++++Q2=====#c".as_bytes());
    let bank = FileBank::new(&path);

    let text = bank.fetch().await.unwrap();
    assert_eq!(text, "Q1=====a=====#b+++++Q2=====#c");
    assert_eq!(bank.describe(), path.display().to_string());
}

#[tokio::test]
async fn file_bank_strips_byte_order_mark() {
    let path = scratch_file("bom.txt", "\u{feff}Q=====#a".as_bytes());
    let text = FileBank::new(path).fetch().await.unwrap();
    assert_eq!(text, "Q=====#a");
}

#[tokio::test]
async fn missing_file_is_not_found() {
    let bank = FileBank::new("/definitely/not/here/bank.txt");
    let err = bank.fetch().await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound { .. }));
}

#[tokio::test]
async fn invalid_utf8_is_an_encoding_error() {
    let path = scratch_file("latin1.txt", &[b'Q', 0xff, 0xfe, b'!']);
    let err = FileBank::new(path).fetch().await.unwrap_err();
    assert!(matches!(err, StorageError::Encoding(_)));
}
