//! Prelude, data segment and program entry

use crate::compiler::ir::WordSize;
use crate::compiler::writer::CodeWriter;

/// Fixed helpers: wraparound arithmetic and byte-oriented character I/O
fn prelude(word: WordSize) -> String {
    let max = word.max_str();
    format!(
        r#"import Data.Array.IO as A
import Data.Bits ((.&.))
import Data.Char (chr, ord)
import System.Exit (exitSuccess)
import System.IO (hSetBinaryMode, isEOF, stdin, stdout)

type Memory = A.IOUArray Int Int

add :: Int -> Int -> Int
add x y = (x + y) .&. {max}

sub :: Int -> Int -> Int
sub x y = (x - y) .&. {max}

putc :: Int -> IO ()
putc c = putChar . chr $ c `mod` 256

getc :: IO Int
getc = do
 eof <- isEOF
 if eof
  then return 0
  else ord <$> getChar

main :: IO ()
main = do
"#
    )
}

/// Literal rows of the initial memory image, at most `row_width` words each
pub fn data_rows(data: &[i64], word: WordSize, row_width: usize) -> Vec<String> {
    let mut rows: Vec<String> = data
        .chunks(row_width.max(1))
        .map(|row| {
            row.iter()
                .map(|&v| word.wrap(v).to_string())
                .collect::<Vec<_>>()
                .join(", ")
        })
        .collect();
    let last = rows.len().saturating_sub(1);
    for row in rows.iter_mut().take(last) {
        row.push(',');
    }
    rows
}

/// Emits the prelude, the memory image and the entry call into block 0
pub fn emit_bootstrap(data: &[i64], word: WordSize, row_width: usize, out: &mut CodeWriter) {
    out.emit_raw(&prelude(word));

    out.inc_indent();
    out.emit_line("hSetBinaryMode stdin True");
    out.emit_line("hSetBinaryMode stdout True");
    out.emit_line(&format!(
        "mem <- A.newListArray (0, {}) $ [",
        word.max_str()
    ));
    out.inc_indent();
    out.inc_indent();
    for row in data_rows(data, word, row_width) {
        out.emit_line(&row);
    }
    out.dec_indent();
    out.emit_line("] ++ [0, 0..]");
    out.dec_indent();
    out.emit_line("run 0 0 0 0 0 0 0 mem");
    out.dec_indent();

    out.emit_line("");
    out.emit_line("run :: Int -> Int -> Int -> Int -> Int -> Int -> Int -> Memory -> IO ()");
}
