//! Fixed-layout, versioned model state record.
//!
//! Layout: `[version: u8][trained: u8][slope: f64][intercept: f64]`, little-endian,
//! [`RECORD_LENGTH`] bytes in total. Anything else is rejected.

use crate::model::{Coefficients, Error, Regression};

pub const VERSION: u8 = 1;
pub const RECORD_LENGTH: usize = 18;

const UNTRAINED: u8 = 0;
const TRAINED: u8 = 1;

#[must_use]
pub fn encode(model: &Regression) -> Vec<u8> {
    let (flag, coefficients) = match model {
        Regression::Untrained => (UNTRAINED, Coefficients { slope: 0.0, intercept: 0.0 }),
        Regression::Trained(coefficients) => (TRAINED, *coefficients),
    };
    let mut record = Vec::with_capacity(RECORD_LENGTH);
    record.push(VERSION);
    record.push(flag);
    record.extend_from_slice(&coefficients.slope.to_le_bytes());
    record.extend_from_slice(&coefficients.intercept.to_le_bytes());
    debug_assert_eq!(record.len(), RECORD_LENGTH);
    record
}

pub fn decode(record: &[u8]) -> Result<Regression, Error> {
    let record: &[u8; RECORD_LENGTH] = record
        .try_into()
        .map_err(|_| Error::CorruptState("unexpected record length"))?;
    let [version, flag, payload @ ..] = record;
    if *version != VERSION {
        return Err(Error::CorruptState("unsupported record version"));
    }
    let (slope, intercept) = payload.split_at(8);

    match *flag {
        UNTRAINED if payload.iter().all(|byte| *byte == 0) => Ok(Regression::Untrained),
        UNTRAINED => Err(Error::CorruptState("untrained record carries coefficients")),
        TRAINED => {
            let coefficients = Coefficients {
                slope: read_f64(slope)?,
                intercept: read_f64(intercept)?,
            };
            Ok(Regression::Trained(coefficients))
        }
        _ => Err(Error::CorruptState("unknown trained flag")),
    }
}

fn read_f64(bytes: &[u8]) -> Result<f64, Error> {
    let bytes: [u8; 8] = bytes
        .try_into()
        .map_err(|_| Error::CorruptState("unexpected coefficient length"))?;
    match f64::from_le_bytes(bytes) {
        value if value.is_finite() => Ok(value),
        _ => Err(Error::CorruptState("non-finite coefficient")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_layout_ok() {
        let record = encode(&Regression::Trained(Coefficients {
            slope: 1.0,
            intercept: -2.5,
        }));
        assert_eq!(record.len(), RECORD_LENGTH);
        assert_eq!(record[0], VERSION);
        assert_eq!(record[1], TRAINED);
        assert_eq!(&record[2..10], &1.0_f64.to_le_bytes());
        assert_eq!(&record[10..], &(-2.5_f64).to_le_bytes());
    }

    #[test]
    fn round_trip_trained_ok() -> Result<(), Error> {
        let mut model = Regression::new();
        model.fit(&[0.1, 0.7, 1.9], &[3.3, -0.2, 8.15])?;
        let decoded = decode(&encode(&model))?;
        assert_eq!(decoded, model);
        assert_eq!(decoded.slope()?.to_bits(), model.slope()?.to_bits());
        assert_eq!(decoded.intercept()?.to_bits(), model.intercept()?.to_bits());
        Ok(())
    }

    #[test]
    fn round_trip_untrained_ok() -> Result<(), Error> {
        assert_eq!(decode(&encode(&Regression::Untrained))?, Regression::Untrained);
        Ok(())
    }

    #[test]
    fn round_trip_zero_coefficients_ok() -> Result<(), Error> {
        let model = Regression::Trained(Coefficients { slope: 0.0, intercept: 0.0 });
        let decoded = decode(&encode(&model))?;
        assert!(decoded.is_trained());
        Ok(())
    }

    #[test]
    fn truncated_record_is_corrupt() {
        let record = encode(&Regression::Untrained);
        assert!(matches!(decode(&record[..17]), Err(Error::CorruptState(_))));
        assert!(matches!(decode(&[]), Err(Error::CorruptState(_))));
    }

    #[test]
    fn extended_record_is_corrupt() {
        let mut record = encode(&Regression::Untrained);
        record.push(0);
        assert!(matches!(decode(&record), Err(Error::CorruptState(_))));
    }

    #[test]
    fn foreign_version_is_corrupt() {
        let mut record = encode(&Regression::Untrained);
        record[0] = 2;
        assert_eq!(decode(&record), Err(Error::CorruptState("unsupported record version")));
    }

    #[test]
    fn unknown_flag_is_corrupt() {
        let mut record = encode(&Regression::Untrained);
        record[1] = 2;
        assert_eq!(decode(&record), Err(Error::CorruptState("unknown trained flag")));
    }

    #[test]
    fn dirty_untrained_record_is_corrupt() {
        let mut record = encode(&Regression::Untrained);
        record[5] = 1;
        assert!(matches!(decode(&record), Err(Error::CorruptState(_))));
    }

    #[test]
    fn non_finite_coefficient_is_corrupt() {
        let mut record = encode(&Regression::Trained(Coefficients {
            slope: 1.0,
            intercept: 1.0,
        }));
        record[2..10].copy_from_slice(&f64::NAN.to_le_bytes());
        assert_eq!(decode(&record), Err(Error::CorruptState("non-finite coefficient")));
    }
}
