//! Reader for CIFAR binary records.
//!
//! Each record is exactly [`RECORD_LEN`] bytes: a single label byte followed
//! by the red, green and blue planes of a 32×32 image. Within a plane pixels
//! are stored row by row. The file carries no header, count or checksum; the
//! end of the stream is the only end condition.
//!
//! ```
//! # use cifar_neurons::record::*;
//! let mut bytes = vec![7u8];
//! bytes.extend(std::iter::repeat(0xFF).take(3072));
//! let record = read_record(&mut &bytes[..]).unwrap();
//! assert_eq!(record.label, 7);
//! assert_eq!(record.image.pixel(10, 20), [255, 255, 255]);
//! ```

use std::io::{ErrorKind, Read};

use itertools::iproduct;

use crate::error::{Error, Result};
use crate::image::{Image, CHANNELS, HEIGHT, IMAGE_LEN, PLANE_LEN, WIDTH};

/// Size in bytes of one labeled record.
pub const RECORD_LEN: usize = 1 + IMAGE_LEN;
/// Number of image classes.
pub const NUM_CLASSES: usize = 10;
/// Length of the flattened input vector.
pub const INPUT_LEN: usize = PLANE_LEN;

/// One labeled image.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Record {
    /// The raw label byte, interpreted as signed.
    pub label: i8,
    pub image: Image,
}

impl Record {
    /// Returns the class index if the label is within `0..NUM_CLASSES`.
    pub fn class(&self) -> Option<usize> {
        usize::try_from(self.label)
            .ok()
            .filter(|&class| class < NUM_CLASSES)
    }

    /// Writes the network input for this record into `input`.
    ///
    /// The image is traversed channel first, then by row and column; each
    /// pixel position `row * 32 + col` receives the mean of its three
    /// channels scaled into `[0, 1]`.
    pub fn flatten_into(&self, input: &mut [f64]) {
        assert_eq!(input.len(), INPUT_LEN);
        for x in input.iter_mut() {
            *x = 0.0;
        }
        let scale = 1.0 / (255.0 * CHANNELS as f64);
        for (channel, row, col) in iproduct!(0..CHANNELS, 0..HEIGHT, 0..WIDTH) {
            input[row * WIDTH + col] +=
                f64::from(self.image.get(row, col, channel)) * scale;
        }
    }

    /// Writes the one-hot expected output for this record into `expected`.
    ///
    /// Returns false, leaving `expected` all zeros, if the label is not a
    /// valid class.
    pub fn one_hot_into(&self, expected: &mut [f64]) -> bool {
        assert_eq!(expected.len(), NUM_CLASSES);
        for x in expected.iter_mut() {
            *x = 0.0;
        }
        match self.class() {
            Some(class) => {
                expected[class] = 1.0;
                true
            }
            None => false,
        }
    }
}

/// Reads a single record from `reader`.
pub fn read_record<R: Read>(reader: &mut R) -> Result<Record> {
    let mut record = Record::default();
    read_record_into(reader, &mut record)?;
    Ok(record)
}

/// Reads a single record from `reader`, overwriting `record` in place.
///
/// Consumes exactly [`RECORD_LEN`] bytes on success. If the stream ends
/// first, returns `Error::IncompleteRecord` and leaves `record` untouched.
pub fn read_record_into<R: Read>(reader: &mut R, record: &mut Record) -> Result<()> {
    let mut buf = [0u8; RECORD_LEN];
    let read = fill(reader, &mut buf)?;
    if read < RECORD_LEN {
        return Err(Error::IncompleteRecord {
            read,
            expected: RECORD_LEN,
        });
    }
    decode(&buf, record);
    Ok(())
}

fn decode(buf: &[u8; RECORD_LEN], record: &mut Record) {
    record.label = buf[0] as i8;
    let pixels = &buf[1..];
    for (channel, row, col) in iproduct!(0..CHANNELS, 0..HEIGHT, 0..WIDTH) {
        let value = pixels[channel * PLANE_LEN + row * WIDTH + col];
        record.image.set(row, col, channel, value);
    }
}

/// Reads until `buf` is full or the stream ends, returning the byte count.
fn fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut read = 0;
    while read < buf.len() {
        match reader.read(&mut buf[read..]) {
            Ok(0) => break,
            Ok(n) => read += n,
            Err(ref e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(read)
}

/// An iterator over the records of a stream.
///
/// Ends cleanly when the stream ends on a record boundary; a truncated final
/// record yields `Error::IncompleteRecord` once.
pub struct Records<R> {
    reader: R,
    done: bool,
}

impl<R: Read> Records<R> {
    pub fn new(reader: R) -> Self {
        Records {
            reader,
            done: false,
        }
    }
}

impl<R: Read> Iterator for Records<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut record = Record::default();
        match read_record_into(&mut self.reader, &mut record) {
            Ok(()) => Some(Ok(record)),
            Err(Error::IncompleteRecord { read: 0, .. }) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
