use serde::{Deserialize, Serialize};

/// Raw training data, as posted to `/train` and replayed by the plot.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Samples {
    #[serde(rename = "X")]
    pub x: Vec<f64>,

    pub y: Vec<f64>,
}

impl Samples {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_request_ok() -> serde_json::Result<()> {
        let samples: Samples = serde_json::from_str(r#"{"X": [1, 2, 3], "y": [2.5, 3, 4]}"#)?;
        assert_eq!(samples.x, vec![1.0, 2.0, 3.0]);
        assert_eq!(samples.y, vec![2.5, 3.0, 4.0]);
        assert_eq!(samples.len(), 3);
        Ok(())
    }

    #[test]
    fn iter_ok() {
        let samples = Samples {
            x: vec![1.0, 2.0],
            y: vec![3.0, 4.0],
        };
        assert_eq!(samples.iter().collect::<Vec<_>>(), vec![(1.0, 3.0), (2.0, 4.0)]);
    }
}
