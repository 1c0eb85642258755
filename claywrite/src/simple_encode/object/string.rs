use std::io;

use crate::{
    pdf::PdfString,
    simple_encode::SimpleEncoder,
    writer::{Encoder, Writer},
};

/// Mark all parentheses that have no partner. Balanced parentheses can be
/// written as they are, unbalanced ones would determine the end of the string
/// and need to be escaped.
fn unbalanced_parentheses(data: &[u8]) -> Vec<bool> {
    let mut unbalanced = vec![false; data.len()];
    let mut open = Vec::new();
    for (index, &c) in data.iter().enumerate() {
        match c {
            b'(' => open.push(index),
            b')' => {
                if open.pop().is_none() {
                    unbalanced[index] = true;
                }
            }
            _ => {}
        }
    }
    for index in open {
        unbalanced[index] = true;
    }
    unbalanced
}

impl Encoder<PdfString> for SimpleEncoder {
    fn write_to(str: &PdfString, writer: &mut dyn Writer) -> io::Result<()> {
        writer.write(b"(")?;

        let unbalanced = unbalanced_parentheses(str);
        let mut last_written_index = 0;
        for (index, &char) in str.iter().enumerate() {
            let escaped: &[u8] = match char {
                b'\\' => br"\\",
                // readers normalize a bare carriage return to a line feed
                b'\r' => br"\r",
                b'(' | b')' if unbalanced[index] => {
                    if char == b'(' {
                        br"\("
                    } else {
                        br"\)"
                    }
                }
                _ => continue,
            };
            writer.write(&str[last_written_index..index])?;
            writer.write(escaped)?;
            last_written_index = index + 1;
        }
        writer.write(&str[last_written_index..])?;
        writer.write(b")")
    }
}
