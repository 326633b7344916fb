use crate::error::StatsResult;
use crate::results::NullResult;
use crate::traits::DerivedStat;

/// Records the latest raw value and how many samples have arrived.
#[derive(Debug, Clone)]
pub struct Passthrough<T> {
    value: Option<T>,
    samples: u64,
}

impl<T: Clone> DerivedStat for Passthrough<T> {
    type Raw = T;
    type Result = NullResult<T>;
    type Config = ();

    fn parse_annotation(_annotation: &str) -> StatsResult<()> {
        Ok(())
    }

    fn with_config(_config: ()) -> Self {
        Self {
            value: None,
            samples: 0,
        }
    }

    fn update(&mut self, raw: &T) {
        self.samples += 1;
        self.value = Some(raw.clone());
    }

    fn fill_result(&self, res: &mut NullResult<T>) -> bool {
        match &self.value {
            Some(value) => {
                res.samples = self.samples;
                res.value = value.clone();
                true
            }
            None => false,
        }
    }
}
