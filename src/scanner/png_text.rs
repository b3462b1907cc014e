//! PNG テキストチャンクの読み出し
//!
//! 画像データ（IDAT）より前にある tEXt / zTXt / iTXt をファイル内の順に集める。
//! 構造の検証は png クレートに任せ、テキストチャンクは自前で1つずつ読む。
//! 壊れたテキストチャンクはそのチャンクだけを捨て、他のチャンクは残す。

use crate::error::{Result, SearchError};
use crate::error_log::ErrorSink;
use flate2::read::ZlibDecoder;
use png_meta_search_common::Metadata;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// PNG ファイルのテキストメタデータを取得
pub fn extract_metadata(path: &Path) -> Result<Metadata> {
    validate_png(path)?;

    let mut reader = BufReader::new(File::open(path)?);
    let mut signature = [0u8; 8];
    reader.read_exact(&mut signature)?;

    let mut metadata = Metadata::new();

    loop {
        let mut header = [0u8; 8];
        if reader.read_exact(&mut header).is_err() {
            break;
        }
        let length = u32::from_be_bytes([header[0], header[1], header[2], header[3]]) as u64;
        let kind = [header[4], header[5], header[6], header[7]];
        if &kind == b"IDAT" || &kind == b"IEND" {
            break;
        }

        let mut data = Vec::new();
        (&mut reader).take(length).read_to_end(&mut data)?;
        if (data.len() as u64) < length {
            break;
        }
        let mut crc = [0u8; 4];
        if reader.read_exact(&mut crc).is_err() {
            break;
        }

        let entry = match &kind {
            b"tEXt" => Some(parse_text(&data)),
            b"zTXt" => parse_compressed_text(&data),
            b"iTXt" => parse_international_text(&data),
            _ => continue,
        };
        match entry {
            Some((key, value)) => metadata.insert(key, value),
            None => log::debug!(
                "{} チャンクを読めないため捨てます: {}",
                String::from_utf8_lossy(&kind),
                path.display()
            ),
        }
    }

    Ok(metadata)
}

/// 失敗時はシンクに記録して空のメタデータを返す
pub fn load_metadata(path: &Path, sink: &dyn ErrorSink) -> Metadata {
    match extract_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) => {
            sink.record("extract_metadata", &e);
            Metadata::new()
        }
    }
}

/// 署名・IHDR・チャンク構造を png クレートで確認する（テキストの中身は見ない）
fn validate_png(path: &Path) -> Result<()> {
    let file = File::open(path)?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    decoder.set_ignore_text_chunk(true);
    decoder
        .read_info()
        .map(|_| ())
        .map_err(|e| SearchError::MetadataRead(format!("{}: {}", path.display(), e)))
}

fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// 最初の NUL で分割（NUL が無ければ全体がキー）
fn split_at_nul(data: &[u8]) -> (&[u8], Option<&[u8]>) {
    match data.iter().position(|&b| b == 0) {
        Some(i) => (&data[..i], Some(&data[i + 1..])),
        None => (data, None),
    }
}

fn inflate(data: &[u8]) -> Option<Vec<u8>> {
    let mut out = Vec::new();
    ZlibDecoder::new(data).read_to_end(&mut out).ok()?;
    Some(out)
}

/// tEXt: `keyword NUL text`。区切りが無ければ値は空文字
fn parse_text(data: &[u8]) -> (String, String) {
    let (key, value) = split_at_nul(data);
    (latin1(key), value.map(latin1).unwrap_or_default())
}

/// zTXt: `keyword NUL method compressed`
fn parse_compressed_text(data: &[u8]) -> Option<(String, String)> {
    let (key, rest) = split_at_nul(data);
    let Some(rest) = rest else {
        return Some((latin1(key), String::new()));
    };
    let (&method, compressed) = rest.split_first()?;
    if method != 0 {
        return None;
    }
    Some((latin1(key), latin1(&inflate(compressed)?)))
}

/// iTXt: `keyword NUL flag method language NUL translated NUL text`
fn parse_international_text(data: &[u8]) -> Option<(String, String)> {
    let (key, rest) = split_at_nul(data);
    let rest = rest?;
    let (&flag, rest) = rest.split_first()?;
    let (&method, rest) = rest.split_first()?;
    let (_language, rest) = split_at_nul(rest);
    let (_translated, text) = split_at_nul(rest?);
    let text = text?;

    let text = match (flag, method) {
        (0, _) => text.to_vec(),
        (1, 0) => inflate(text)?,
        _ => return None,
    };
    Some((latin1(key), String::from_utf8(text).ok()?))
}
