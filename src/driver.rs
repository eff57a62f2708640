//! The driver loop: read a record, dump its image, run a training step.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;
use std::time::Instant;

use itertools::Itertools;
use log::{debug, info, warn};
use rand::Rng;

use crate::config::DriverConfig;
use crate::error::{Error, Result};
use crate::network::Network;
use crate::ppm::dump_image;
use crate::record::{read_record_into, Record, NUM_CLASSES};
use crate::trainer::{TrainingStep, Untrained};

/// Logging frequency to use while processing records
#[derive(Copy, Clone, Debug)]
pub enum Logging {
    /// No progress is logged
    Silent,
    /// A summary is logged at completion
    Completion,
    /// Progress is logged after every `n` records, plus a summary at
    /// completion
    Records(usize),
}

impl Logging {
    /// Performs logging after the record at `index` has been processed.
    fn record(&self, index: usize, label: i8) {
        if let Logging::Records(freq) = *self {
            if freq > 0 && index % freq == 0 {
                info!("cifar training image #: {} (label {})", index, label);
            }
        }
    }

    /// Performs logging at the end of the run.
    fn completion(&self, summary: &RunSummary, start_time: Instant) {
        if let Logging::Silent = *self {
            return;
        }
        info!(
            "Processed {} records in {:.2?}, wrote {} distinct images.",
            summary.records_processed,
            start_time.elapsed(),
            summary.distinct_files().len()
        );
    }
}

/// What a completed run did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of full read/dump/train cycles.
    pub records_processed: usize,
    /// Labels of the processed records, in order.
    pub labels: Vec<i8>,
    /// Image paths written, in order. Contains repeats when file names collide.
    pub files_written: Vec<PathBuf>,
}

impl RunSummary {
    /// The files left on disk, in first-written order.
    pub fn distinct_files(&self) -> Vec<&PathBuf> {
        self.files_written.iter().unique().collect()
    }
}

/// Runs the read → dump → train loop
#[derive(Debug)]
pub struct Driver<T: TrainingStep> {
    config: DriverConfig,
    trainer: T,
    logging: Logging,
}

impl Driver<Untrained> {
    /// Creates a new Driver instance.
    ///
    /// The driver is initialized with the no-op `Untrained` training step and
    /// logs every record.
    pub fn new(config: DriverConfig) -> Self {
        Driver {
            config,
            trainer: Untrained,
            logging: Logging::Records(1),
        }
    }
}

impl<T: TrainingStep> Driver<T> {
    /// Sets the training step invoked after each record.
    pub fn trainer<U: TrainingStep>(self, trainer: U) -> Driver<U> {
        Driver {
            config: self.config,
            trainer,
            logging: self.logging,
        }
    }

    /// Sets the type of logging to be emitted during the run.
    pub fn logging(mut self, logging: Logging) -> Self {
        self.logging = logging;
        self
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Consumes the driver, returning its training step.
    pub fn into_trainer(self) -> T {
        self.trainer
    }

    /// Opens the configured input file and processes records from it.
    pub fn run<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<RunSummary> {
        let path = &self.config.input_path;
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::InputNotFound { path: path.clone() },
            _ => Error::Io(e),
        })?;
        self.run_from_reader(BufReader::new(file), rng)
    }

    /// Processes `record_count` records from `reader`.
    ///
    /// Each iteration reads a record, fills the network input and the
    /// expected output, writes the image and runs one training step. The
    /// first failure aborts the remaining iterations.
    pub fn run_from_reader<S, R>(&mut self, mut reader: S, rng: &mut R) -> Result<RunSummary>
    where
        S: Read,
        R: Rng + ?Sized,
    {
        self.config.validate()?;
        let start_time = Instant::now();
        info!("............training cifar dataset");

        let mut network = Network::cifar(rng)?;
        let mut record = Record::default();
        let mut expected = vec![0.0; NUM_CLASSES];
        let mut summary = RunSummary::default();

        for index in 0..self.config.record_count {
            read_record_into(&mut reader, &mut record)?;
            record.flatten_into(network.input_mut());
            if !record.one_hot_into(&mut expected) {
                warn!("record {} has out-of-range label {}", index, record.label);
            }

            let path = dump_image(
                &self.config.output_dir,
                &record.image,
                index,
                record.label,
                self.config.file_naming,
            )?;
            debug!("wrote {}", path.display());

            self.trainer.step(&mut network, &expected)?;

            self.logging.record(index, record.label);
            summary.records_processed += 1;
            summary.labels.push(record.label);
            summary.files_written.push(path);
        }

        self.logging.completion(&summary, start_time);
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::IMAGE_LEN;
    use crate::ppm::FileNaming;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::io::Cursor;

    fn stream(labels: &[u8]) -> Cursor<Vec<u8>> {
        let mut bytes = Vec::new();
        for &label in labels {
            bytes.push(label);
            bytes.extend(vec![label.wrapping_mul(20); IMAGE_LEN]);
        }
        Cursor::new(bytes)
    }

    fn config(dir: &std::path::Path, count: usize) -> DriverConfig {
        DriverConfig {
            output_dir: dir.to_path_buf(),
            record_count: count,
            ..DriverConfig::default()
        }
    }

    /// Records every expected vector it is handed.
    #[derive(Default)]
    struct Recorder {
        targets: Vec<Vec<f64>>,
        inputs: Vec<f64>,
    }

    impl TrainingStep for Recorder {
        fn step(&mut self, network: &mut Network, expected: &[f64]) -> Result<()> {
            self.targets.push(expected.to_vec());
            self.inputs.push(network.input()[0]);
            Ok(())
        }
    }

    #[test]
    fn trainer_sees_each_record() {
        let dir = tempfile::tempdir().unwrap();
        let mut driver = Driver::new(config(dir.path(), 3))
            .trainer(Recorder::default())
            .logging(Logging::Silent);
        let summary = driver
            .run_from_reader(stream(&[2, 0, 9]), &mut ChaCha8Rng::seed_from_u64(0))
            .unwrap();
        assert_eq!(summary.labels, vec![2, 0, 9]);

        let recorder = driver.into_trainer();
        let hot: Vec<usize> = recorder
            .targets
            .iter()
            .map(|t| t.iter().position(|&x| x == 1.0).unwrap())
            .collect();
        assert_eq!(hot, vec![2, 0, 9]);
        assert!((recorder.inputs[0] - 40.0 / 255.0).abs() < 1e-12);
        assert_eq!(recorder.inputs[1], 0.0);
    }

    #[test]
    fn stops_at_record_count() {
        let dir = tempfile::tempdir().unwrap();
        let mut reader = stream(&[1, 2, 3]);
        let summary = Driver::new(config(dir.path(), 2))
            .logging(Logging::Silent)
            .run_from_reader(&mut reader, &mut ChaCha8Rng::seed_from_u64(0))
            .unwrap();
        assert_eq!(summary.records_processed, 2);
        assert_eq!(reader.position(), 2 * 3073);
    }

    #[test]
    fn short_input_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let err = Driver::new(config(dir.path(), 3))
            .logging(Logging::Silent)
            .run_from_reader(stream(&[1, 2]), &mut ChaCha8Rng::seed_from_u64(0))
            .unwrap_err();
        assert!(matches!(err, Error::IncompleteRecord { read: 0, .. }));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn failing_trainer_aborts() {
        struct Failing;
        impl TrainingStep for Failing {
            fn step(&mut self, _: &mut Network, _: &[f64]) -> Result<()> {
                Err(Error::Config("no".to_string()))
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let result = Driver::new(config(dir.path(), 2))
            .trainer(Failing)
            .logging(Logging::Silent)
            .run_from_reader(stream(&[1, 2]), &mut ChaCha8Rng::seed_from_u64(0));
        assert!(result.is_err());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(dir.path(), 1);
        cfg.input_path = dir.path().join("missing.bin");
        let err = Driver::new(cfg)
            .run(&mut ChaCha8Rng::seed_from_u64(0))
            .unwrap_err();
        assert!(matches!(err, Error::InputNotFound { .. }));
    }

    #[test]
    fn distinct_files_dedupes() {
        let summary = RunSummary {
            records_processed: 3,
            labels: vec![1, 2, 1],
            files_written: vec!["a".into(), "b".into(), "a".into()],
        };
        assert_eq!(summary.distinct_files(), vec![&PathBuf::from("a"), &PathBuf::from("b")]);
    }

    #[test]
    fn distinct_files_scales_to_many_records() {
        let n = 50_000;
        let naming = FileNaming::IndexedLabel;
        let files_written: Vec<PathBuf> = (0..n)
            .map(|i| PathBuf::from(naming.file_name(i, (i % 10) as i8)))
            .collect();
        let summary = RunSummary {
            records_processed: n,
            labels: Vec::new(),
            files_written,
        };

        let start = Instant::now();
        let distinct = summary.distinct_files();
        assert_eq!(distinct.len(), n);
        assert_eq!(distinct[0], &PathBuf::from("0_0_cifar_image_output.ppm"));
        assert!(start.elapsed().as_secs() < 5);
    }
}
