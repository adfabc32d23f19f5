//! Return composition — net = gross − cost, pointwise.

use crate::error::AnalysisError;

/// Subtract a cost series from a gross return series, pointwise.
///
/// Exact length match is a hard precondition: a mismatch means the caller
/// composed series from different runs, and silently truncating or padding
/// would corrupt every downstream statistic.
pub fn net_returns(gross: &[f64], costs: &[f64]) -> Result<Vec<f64>, AnalysisError> {
    if gross.len() != costs.len() {
        return Err(AnalysisError::MisalignedSeries {
            context: "gross returns vs costs",
            expected: gross.len(),
            actual: costs.len(),
        });
    }
    Ok(gross.iter().zip(costs).map(|(g, c)| g - c).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;

    #[test]
    fn pointwise_subtraction() {
        let net = net_returns(&[0.01, -0.02, 0.0], &[0.001, 0.0, 0.002]).unwrap();
        assert_eq!(net, vec![0.009, -0.02, -0.002]);
    }

    #[test]
    fn zero_costs_preserve_gross_exactly() {
        let gross = [0.01, -0.005, 0.003];
        let net = net_returns(&gross, &[0.0; 3]).unwrap();
        assert_eq!(net, gross.to_vec());
    }

    #[test]
    fn length_mismatch_is_an_error() {
        let err = net_returns(&[0.01, 0.02], &[0.001]).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::MisalignedSeries {
                context: "gross returns vs costs",
                expected: 2,
                actual: 1
            }
        );
    }
}
