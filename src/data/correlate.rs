use thiserror::Error;

use super::model::{StatsTable, PLAYER_COLUMN, POS_COLUMN, TEAM_COLUMN};

/// Identity columns never fed into the correlation, matching the pickers on
/// the filter side.
pub const EXCLUDED_COLUMNS: [&str; 3] = [PLAYER_COLUMN, POS_COLUMN, TEAM_COLUMN];

/// Square, symmetric matrix over the numeric columns that survived
/// cleaning. Diagonal is exactly 1.0; all values sit in [-1, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn size(&self) -> usize {
        self.labels.len()
    }

    pub fn value(&self, row: usize, col: usize) -> f64 {
        self.values[row][col]
    }
}

/// Why no heatmap could be drawn. Shown in place of the plot; the rest of
/// the view stays interactive.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CorrelationError {
    #[error("No numeric data available for correlation analysis after cleaning")]
    InsufficientData,
    #[error("Not enough numeric columns for correlation analysis")]
    InsufficientColumns,
}

/// Correlate every numeric column of the table against every other, with
/// the standard identity columns excluded.
pub fn correlate(table: &StatsTable) -> Result<CorrelationMatrix, CorrelationError> {
    correlate_excluding(table, &EXCLUDED_COLUMNS)
}

/// The full pipeline behind [`correlate`]:
/// drop excluded columns, coerce the rest cell-by-cell (unparsable cells
/// become missing for this computation only), drop columns left entirely
/// missing, then compute pairwise-complete Pearson coefficients.
pub fn correlate_excluding(
    table: &StatsTable,
    excluded: &[&str],
) -> Result<CorrelationMatrix, CorrelationError> {
    let mut labels = Vec::new();
    let mut columns: Vec<Vec<Option<f64>>> = Vec::new();
    for (c, label) in table.columns.iter().enumerate() {
        if excluded.contains(&label.as_str()) {
            continue;
        }
        let values: Vec<Option<f64>> =
            table.rows.iter().map(|row| row[c].as_number()).collect();
        if values.iter().any(Option::is_some) {
            labels.push(label.clone());
            columns.push(values);
        }
    }

    if columns.is_empty() {
        return Err(CorrelationError::InsufficientData);
    }
    if columns.len() < 2 {
        return Err(CorrelationError::InsufficientColumns);
    }

    let n = columns.len();
    let mut values = vec![vec![0.0; n]; n];
    for i in 0..n {
        values[i][i] = 1.0;
        for j in (i + 1)..n {
            let r = pairwise_pearson(&columns[i], &columns[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Ok(CorrelationMatrix { labels, values })
}

/// Pearson coefficient over the rows where both columns have a value.
/// Fewer than two shared observations, or a zero-variance column, yield 0.0
/// rather than NaN so the heatmap never renders holes.
fn pairwise_pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> f64 {
    let mut n = 0.0_f64;
    let (mut sum_x, mut sum_y) = (0.0, 0.0);
    let (mut sum_xy, mut sum_x2, mut sum_y2) = (0.0, 0.0, 0.0);

    for (x, y) in xs.iter().zip(ys) {
        if let (Some(x), Some(y)) = (x, y) {
            n += 1.0;
            sum_x += x;
            sum_y += y;
            sum_xy += x * y;
            sum_x2 += x * x;
            sum_y2 += y * y;
        }
    }

    if n < 2.0 {
        return 0.0;
    }
    let numerator = n * sum_xy - sum_x * sum_y;
    let denominator = ((n * sum_x2 - sum_x * sum_x) * (n * sum_y2 - sum_y * sum_y)).sqrt();
    if denominator.abs() < f64::EPSILON {
        return 0.0;
    }
    (numerator / denominator).clamp(-1.0, 1.0)
}
