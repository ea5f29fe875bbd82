//! Prediction request built from the nine form inputs.

use serde::{Deserialize, Serialize};

use crate::logic::parameters::{ParameterError, RangeFlag, WaterParameter};

/// Body of `POST /predict`; also the shape returned by `GET /sample`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PredictionRequest {
    #[serde(rename = "ph")]
    pub ph: f64,
    #[serde(rename = "Hardness")]
    pub hardness: f64,
    #[serde(rename = "Solids")]
    pub solids: f64,
    #[serde(rename = "Chloramines")]
    pub chloramines: f64,
    #[serde(rename = "Sulfate")]
    pub sulfate: f64,
    #[serde(rename = "Conductivity")]
    pub conductivity: f64,
    #[serde(rename = "Organic_carbon")]
    pub organic_carbon: f64,
    #[serde(rename = "Trihalomethanes")]
    pub trihalomethanes: f64,
    #[serde(rename = "Turbidity")]
    pub turbidity: f64,
}

impl PredictionRequest {
    /// Sample used when the backend cannot provide one
    pub fn fallback_sample() -> Self {
        Self {
            ph: 7.0,
            hardness: 200.0,
            solids: 20000.0,
            chloramines: 7.0,
            sulfate: 300.0,
            conductivity: 400.0,
            organic_carbon: 10.0,
            trihalomethanes: 60.0,
            turbidity: 4.0,
        }
    }

    /// Build from raw text inputs keyed by wire key.
    ///
    /// Unparsable or missing values become 0; unknown keys are rejected.
    pub fn from_form<'a, I>(inputs: I) -> Result<Self, ParameterError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut request = Self::default();
        for (key, raw) in inputs {
            let param = WaterParameter::from_key(key)?;
            request.set(param, coerce(raw));
        }
        Ok(request)
    }

    pub fn get(&self, param: WaterParameter) -> f64 {
        match param {
            WaterParameter::Ph => self.ph,
            WaterParameter::Hardness => self.hardness,
            WaterParameter::Solids => self.solids,
            WaterParameter::Chloramines => self.chloramines,
            WaterParameter::Sulfate => self.sulfate,
            WaterParameter::Conductivity => self.conductivity,
            WaterParameter::OrganicCarbon => self.organic_carbon,
            WaterParameter::Trihalomethanes => self.trihalomethanes,
            WaterParameter::Turbidity => self.turbidity,
        }
    }

    pub fn set(&mut self, param: WaterParameter, value: f64) {
        let slot = match param {
            WaterParameter::Ph => &mut self.ph,
            WaterParameter::Hardness => &mut self.hardness,
            WaterParameter::Solids => &mut self.solids,
            WaterParameter::Chloramines => &mut self.chloramines,
            WaterParameter::Sulfate => &mut self.sulfate,
            WaterParameter::Conductivity => &mut self.conductivity,
            WaterParameter::OrganicCarbon => &mut self.organic_carbon,
            WaterParameter::Trihalomethanes => &mut self.trihalomethanes,
            WaterParameter::Turbidity => &mut self.turbidity,
        };
        *slot = value;
    }

    /// Readings in form order
    pub fn iter(&self) -> impl Iterator<Item = (WaterParameter, f64)> + '_ {
        WaterParameter::ALL.into_iter().map(move |p| (p, self.get(p)))
    }

    /// Range status of every reading
    pub fn flags(&self) -> Vec<RangeFlag> {
        self.iter().map(|(p, v)| RangeFlag::check(p, v)).collect()
    }
}

/// Lenient number parsing: leading numeric prefix, else 0
pub fn coerce(raw: &str) -> f64 {
    let trimmed = raw.trim();
    let parsed = trimmed.parse::<f64>().ok().or_else(|| {
        // "7.5 mg" → 7.5
        let end = trimmed
            .char_indices()
            .take_while(|(_, c)| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
            .map(|(i, c)| i + c.len_utf8())
            .last()?;
        (1..=end)
            .rev()
            .find_map(|len| trimmed[..len].parse::<f64>().ok())
    });

    match parsed {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_keys() {
        let json = serde_json::to_value(PredictionRequest::fallback_sample()).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 9);
        for param in WaterParameter::ALL {
            assert!(obj.contains_key(param.key()), "missing {}", param.key());
        }
        assert_eq!(obj["Organic_carbon"], 10.0);
    }

    #[test]
    fn test_coerce() {
        assert_eq!(coerce("7.25"), 7.25);
        assert_eq!(coerce("  300 "), 300.0);
        assert_eq!(coerce(""), 0.0);
        assert_eq!(coerce("abc"), 0.0);
        assert_eq!(coerce("7.5 mg"), 7.5);
        assert_eq!(coerce("1e3"), 1000.0);
        assert_eq!(coerce("NaN"), 0.0);
        assert_eq!(coerce("-"), 0.0);
    }

    #[test]
    fn test_from_form_fills_missing_with_zero() {
        let request = PredictionRequest::from_form([("ph", "6.8"), ("Turbidity", "oops")]).unwrap();
        assert_eq!(request.ph, 6.8);
        assert_eq!(request.turbidity, 0.0);
        assert_eq!(request.hardness, 0.0);
    }

    #[test]
    fn test_from_form_rejects_unknown_key() {
        let err = PredictionRequest::from_form([("Lead", "0.1")]).unwrap_err();
        assert_eq!(err, ParameterError::UnknownKey("Lead".to_string()));
    }

    #[test]
    fn test_get_set_roundtrip_every_param() {
        let mut request = PredictionRequest::default();
        for (i, param) in WaterParameter::ALL.into_iter().enumerate() {
            request.set(param, i as f64);
        }
        let values: Vec<f64> = request.iter().map(|(_, v)| v).collect();
        assert_eq!(values, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    }

    #[test]
    fn test_fallback_sample_flags() {
        let flags = PredictionRequest::fallback_sample().flags();
        assert_eq!(flags.len(), 9);
        // Sulfate 300 sits inside its band, Trihalomethanes 60 too
        assert!(flags.iter().all(|f| !f.is_out_of_range()));
    }
}
