use crate::error::ModelError;
use approx::AbsDiffEq;
use ndarray::{Array2, Axis, concatenate, s};
use rayon::prelude::*;
use std::fmt;

/// Elementwise tolerance used by `DenseMatrix` equality.
///
/// Repeated floating point operations accumulate drift, so two matrices compare equal
/// when every pair of elements differs by no more than this amount.
pub const EQUALITY_TOLERANCE: f64 = 1e-15;

/// Threshold for using parallel computation in elementwise maps.
/// When the total number of elements >= this threshold, rayon is used.
const PARALLEL_MAP_THRESHOLD: usize = 4096;

/// Two-dimensional, row-major matrix of `f64` values.
///
/// `DenseMatrix` is the numeric kernel everything else is built on. It wraps an
/// `ndarray::Array2<f64>` and adds the operations a multi-layer perceptron needs:
/// bias row/column helpers, half-open slicing, axis reductions and elementwise maps.
///
/// Operations come in two flavours. Copying operations (`plus`, `scale`, `apply`, ...)
/// leave `self` untouched and return a new matrix. In-place operations carry an
/// `_in_place` suffix and mutate `self`; they are used where the allocation matters:
/// weight updates, momentum accumulation, dropout masking and regularization.
///
/// Elementwise binary operations between matrices of different shapes fail with
/// `ModelError::ShapeMismatch` naming both shapes.
///
/// # Example
/// ```rust
/// use rustymlp::matrix::DenseMatrix;
///
/// let a = DenseMatrix::from_grid(&[[1.0, 2.0], [3.0, 4.0]]);
/// let b = DenseMatrix::filled(2, 2, 0.5);
///
/// let sum = a.plus(&b).unwrap();
/// assert_eq!(sum.get(1, 1), 4.5);
///
/// let with_bias = a.add_bias_column();
/// assert_eq!(with_bias.num_cols(), 3);
/// assert_eq!(with_bias.get(0, 0), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct DenseMatrix {
    data: Array2<f64>,
}

impl DenseMatrix {
    /// Creates a column vector (`values.len() x 1`) holding the given values.
    pub fn from_column(values: &[f64]) -> Self {
        Self {
            data: Array2::from_shape_fn((values.len(), 1), |(i, _)| values[i]),
        }
    }

    /// Creates a matrix from a slice of rows.
    ///
    /// # Parameters
    ///
    /// * `rows` - Row data; every row must have the same length
    ///
    /// # Returns
    ///
    /// - `Ok(DenseMatrix)` - A `rows.len() x rows[0].len()` matrix
    /// - `Err(ModelError::ShapeMismatch)` - If the rows are ragged
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, ModelError> {
        let num_rows = rows.len();
        let num_cols = rows.first().map_or(0, |row| row.len());

        if let Some(bad) = rows.iter().find(|row| row.len() != num_cols) {
            return Err(ModelError::shape_mismatch(
                "from_rows",
                (1, num_cols),
                (1, bad.len()),
            ));
        }

        let flat: Vec<f64> = rows.iter().flatten().copied().collect();
        let data = Array2::from_shape_vec((num_rows, num_cols), flat).map_err(|_| {
            ModelError::shape_mismatch("from_rows", (num_rows, num_cols), (num_rows, num_cols))
        })?;
        Ok(Self { data })
    }

    /// Creates a matrix from a fixed-width grid. Infallible because every row has `C` columns.
    pub fn from_grid<const C: usize>(rows: &[[f64; C]]) -> Self {
        Self {
            data: Array2::from_shape_fn((rows.len(), C), |(i, j)| rows[i][j]),
        }
    }

    /// Wraps an existing `ndarray` matrix.
    pub fn from_array(data: Array2<f64>) -> Self {
        Self { data }
    }

    /// Creates a `rows x cols` matrix filled with zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: Array2::zeros((rows, cols)),
        }
    }

    /// Creates a `rows x cols` matrix filled with ones.
    pub fn ones(rows: usize, cols: usize) -> Self {
        Self {
            data: Array2::ones((rows, cols)),
        }
    }

    /// Creates a `rows x cols` matrix with every element set to `value`.
    pub fn filled(rows: usize, cols: usize, value: f64) -> Self {
        Self {
            data: Array2::from_elem((rows, cols), value),
        }
    }

    pub fn num_rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn num_cols(&self) -> usize {
        self.data.ncols()
    }

    pub fn num_elements(&self) -> usize {
        self.data.len()
    }

    /// Returns `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// A matrix is a vector when it has a single row or a single column.
    pub fn is_vector(&self) -> bool {
        self.num_rows() == 1 || self.num_cols() == 1
    }

    /// Borrows the underlying `ndarray` matrix.
    pub fn as_array(&self) -> &Array2<f64> {
        &self.data
    }

    pub fn into_array(self) -> Array2<f64> {
        self.data
    }

    /// Gets the value at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds, like `ndarray` indexing.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[[row, col]]
    }

    /// *Mutates in place*. Sets the value at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds, like `ndarray` indexing.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[[row, col]] = value;
    }

    /// Copies row `row` out into a `Vec`.
    pub fn row(&self, row: usize) -> Vec<f64> {
        self.data.row(row).to_vec()
    }

    /// Copies column `col` out into a `Vec`.
    pub fn col(&self, col: usize) -> Vec<f64> {
        self.data.column(col).to_vec()
    }

    /// All rows, copied out.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.outer_iter().map(|row| row.to_vec()).collect()
    }

    /// All values in row-major order.
    pub fn values(&self) -> Vec<f64> {
        self.data.iter().copied().collect()
    }

    /// *Mutates in place*. Replaces row `row_index` with `values`.
    ///
    /// # Returns
    ///
    /// - `Ok(())` - The row was replaced
    /// - `Err(ModelError::InvalidRange)` - If `row_index` is past the last row
    /// - `Err(ModelError::ShapeMismatch)` - If `values` does not have `num_cols()` entries
    pub fn set_row(&mut self, row_index: usize, values: &[f64]) -> Result<(), ModelError> {
        if row_index >= self.num_rows() {
            return Err(ModelError::InvalidRange(format!(
                "Row {} is outside a matrix with {} rows",
                row_index,
                self.num_rows()
            )));
        }
        if values.len() != self.num_cols() {
            return Err(ModelError::shape_mismatch(
                "set_row",
                (1, self.num_cols()),
                (1, values.len()),
            ));
        }
        self.data
            .row_mut(row_index)
            .iter_mut()
            .zip(values)
            .for_each(|(dst, &src)| *dst = src);
        Ok(())
    }

    fn assert_same_size(&self, other: &DenseMatrix, operation: &'static str) -> Result<(), ModelError> {
        if self.shape() != other.shape() {
            return Err(ModelError::shape_mismatch(
                operation,
                self.shape(),
                other.shape(),
            ));
        }
        Ok(())
    }

    pub fn plus(&self, other: &DenseMatrix) -> Result<DenseMatrix, ModelError> {
        self.assert_same_size(other, "plus")?;
        Ok(Self::from_array(&self.data + &other.data))
    }

    /// *Mutates in place*. `self += other`.
    pub fn plus_in_place(&mut self, other: &DenseMatrix) -> Result<&mut Self, ModelError> {
        self.assert_same_size(other, "plus_in_place")?;
        self.data += &other.data;
        Ok(self)
    }

    pub fn minus(&self, other: &DenseMatrix) -> Result<DenseMatrix, ModelError> {
        self.assert_same_size(other, "minus")?;
        Ok(Self::from_array(&self.data - &other.data))
    }

    /// *Mutates in place*. `self -= other`. This is the weight-update primitive.
    pub fn minus_in_place(&mut self, other: &DenseMatrix) -> Result<&mut Self, ModelError> {
        self.assert_same_size(other, "minus_in_place")?;
        self.data -= &other.data;
        Ok(self)
    }

    /// Elementwise (Hadamard) product.
    pub fn element_mult(&self, other: &DenseMatrix) -> Result<DenseMatrix, ModelError> {
        self.assert_same_size(other, "element_mult")?;
        Ok(Self::from_array(&self.data * &other.data))
    }

    /// *Mutates in place*. Elementwise (Hadamard) product.
    pub fn element_mult_in_place(&mut self, other: &DenseMatrix) -> Result<&mut Self, ModelError> {
        self.assert_same_size(other, "element_mult_in_place")?;
        self.data *= &other.data;
        Ok(self)
    }

    pub fn element_divide(&self, other: &DenseMatrix) -> Result<DenseMatrix, ModelError> {
        self.assert_same_size(other, "element_divide")?;
        Ok(Self::from_array(&self.data / &other.data))
    }

    /// *Mutates in place*. Elementwise division.
    pub fn element_divide_in_place(
        &mut self,
        other: &DenseMatrix,
    ) -> Result<&mut Self, ModelError> {
        self.assert_same_size(other, "element_divide_in_place")?;
        self.data /= &other.data;
        Ok(self)
    }

    /// Multiplies every element by `factor`.
    pub fn scale(&self, factor: f64) -> DenseMatrix {
        Self::from_array(&self.data * factor)
    }

    /// *Mutates in place*. Multiplies every element by `factor`.
    pub fn scale_in_place(&mut self, factor: f64) -> &mut Self {
        self.data *= factor;
        self
    }

    /// Divides every element by `divisor`.
    pub fn divide_scalar(&self, divisor: f64) -> DenseMatrix {
        Self::from_array(&self.data / divisor)
    }

    /// *Mutates in place*. Divides every element by `divisor`.
    pub fn divide_scalar_in_place(&mut self, divisor: f64) -> &mut Self {
        self.data /= divisor;
        self
    }

    /// Returns `1 - x` for every element.
    pub fn one_minus(&self) -> DenseMatrix {
        Self::from_array(self.data.mapv(|x| 1.0 - x))
    }

    /// Matrix product `self x other`.
    ///
    /// # Returns
    ///
    /// - `Ok(DenseMatrix)` - A `self.rows x other.cols` matrix
    /// - `Err(ModelError::ShapeMismatch)` - If `self.cols != other.rows`
    pub fn multiply(&self, other: &DenseMatrix) -> Result<DenseMatrix, ModelError> {
        if self.num_cols() != other.num_rows() {
            return Err(ModelError::shape_mismatch(
                "multiply",
                self.shape(),
                other.shape(),
            ));
        }
        Ok(Self::from_array(self.data.dot(&other.data)))
    }

    pub fn transpose(&self) -> DenseMatrix {
        Self::from_array(self.data.t().to_owned())
    }

    /// Extracts a sub matrix. Ranges are 0-based and half-open: start inclusive, end exclusive.
    ///
    /// ```text
    /// [1,  2,  3,  4 ]
    /// [5,  6,  7,  8 ]      extract_matrix(1, 3, 1, 3)      [6,  7 ]
    /// [9,  10, 11, 12]   ------------------------------->   [10, 11]
    /// [13, 14, 15, 16]
    /// ```
    ///
    /// # Returns
    ///
    /// - `Ok(DenseMatrix)` - A new matrix owning a copy of the selected values
    /// - `Err(ModelError::InvalidRange)` - If a range is inverted or reaches past the data
    pub fn extract_matrix(
        &self,
        row_start: usize,
        row_end: usize,
        col_start: usize,
        col_end: usize,
    ) -> Result<DenseMatrix, ModelError> {
        if row_start > row_end || row_end > self.num_rows() {
            return Err(ModelError::InvalidRange(format!(
                "Row range {}..{} is not valid for a matrix with {} rows",
                row_start,
                row_end,
                self.num_rows()
            )));
        }
        if col_start > col_end || col_end > self.num_cols() {
            return Err(ModelError::InvalidRange(format!(
                "Column range {}..{} is not valid for a matrix with {} columns",
                col_start,
                col_end,
                self.num_cols()
            )));
        }
        Ok(Self::from_array(
            self.data
                .slice(s![row_start..row_end, col_start..col_end])
                .to_owned(),
        ))
    }

    /// Copies rows `start..end` into a new matrix.
    pub fn slice_rows(&self, start: usize, end: usize) -> Result<DenseMatrix, ModelError> {
        self.extract_matrix(start, end, 0, self.num_cols())
    }

    /// Copies the selected rows, in the given order, into a new matrix.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of bounds.
    pub fn select_rows(&self, indices: &[usize]) -> DenseMatrix {
        Self::from_array(self.data.select(Axis(0), indices))
    }

    /// Returns a copy with a column of ones prepended.
    pub fn add_bias_column(&self) -> DenseMatrix {
        let mut data = Array2::ones((self.num_rows(), self.num_cols() + 1));
        data.slice_mut(s![.., 1..]).assign(&self.data);
        Self::from_array(data)
    }

    /// Returns a copy with the given column prepended.
    ///
    /// # Returns
    ///
    /// - `Ok(DenseMatrix)` - `bias_column` followed by the columns of `self`
    /// - `Err(ModelError::ShapeMismatch)` - If `bias_column` is not `num_rows() x 1`
    pub fn add_bias_column_with(&self, bias_column: &DenseMatrix) -> Result<DenseMatrix, ModelError> {
        if bias_column.num_cols() != 1 || bias_column.num_rows() != self.num_rows() {
            return Err(ModelError::shape_mismatch(
                "add_bias_column",
                self.shape(),
                bias_column.shape(),
            ));
        }
        let data = concatenate(Axis(1), &[bias_column.data.view(), self.data.view()])
            .map_err(|_| {
                ModelError::shape_mismatch("add_bias_column", self.shape(), bias_column.shape())
            })?;
        Ok(Self::from_array(data))
    }

    /// Returns a copy with a row of ones prepended.
    pub fn add_bias_row(&self) -> DenseMatrix {
        let mut data = Array2::ones((self.num_rows() + 1, self.num_cols()));
        data.slice_mut(s![1.., ..]).assign(&self.data);
        Self::from_array(data)
    }

    /// Returns a copy with the given row prepended.
    ///
    /// # Returns
    ///
    /// - `Ok(DenseMatrix)` - `bias_row` followed by the rows of `self`
    /// - `Err(ModelError::ShapeMismatch)` - If `bias_row` is not `1 x num_cols()`
    pub fn add_bias_row_with(&self, bias_row: &DenseMatrix) -> Result<DenseMatrix, ModelError> {
        if bias_row.num_rows() != 1 || bias_row.num_cols() != self.num_cols() {
            return Err(ModelError::shape_mismatch(
                "add_bias_row",
                self.shape(),
                bias_row.shape(),
            ));
        }
        let data = concatenate(Axis(0), &[bias_row.data.view(), self.data.view()])
            .map_err(|_| ModelError::shape_mismatch("add_bias_row", self.shape(), bias_row.shape()))?;
        Ok(Self::from_array(data))
    }

    /// The first row (the bias weights of a layer matrix).
    pub fn bias_row(&self) -> DenseMatrix {
        let end = self.num_rows().min(1);
        Self::from_array(self.data.slice(s![..end, ..]).to_owned())
    }

    /// The first column.
    pub fn bias_column(&self) -> DenseMatrix {
        let end = self.num_cols().min(1);
        Self::from_array(self.data.slice(s![.., ..end]).to_owned())
    }

    /// Drops the first row. On a row vector the first scalar is dropped instead.
    pub fn remove_bias_row(&self) -> DenseMatrix {
        if self.num_rows() == 1 && self.num_cols() > 1 {
            self.drop_first_column()
        } else {
            self.drop_first_row()
        }
    }

    /// Drops the first column. On a column vector the first scalar is dropped instead.
    pub fn remove_bias_column(&self) -> DenseMatrix {
        if self.num_cols() == 1 && self.num_rows() > 1 {
            self.drop_first_row()
        } else {
            self.drop_first_column()
        }
    }

    fn drop_first_row(&self) -> DenseMatrix {
        let start = self.num_rows().min(1);
        Self::from_array(self.data.slice(s![start.., ..]).to_owned())
    }

    fn drop_first_column(&self) -> DenseMatrix {
        let start = self.num_cols().min(1);
        Self::from_array(self.data.slice(s![.., start..]).to_owned())
    }

    /// Sum of each row, as a `num_rows() x 1` column vector.
    pub fn sum_rows(&self) -> DenseMatrix {
        Self::from_array(self.data.sum_axis(Axis(1)).insert_axis(Axis(1)))
    }

    /// Sum of each column, as a `num_cols() x 1` column vector.
    pub fn sum_columns(&self) -> DenseMatrix {
        Self::from_array(self.data.sum_axis(Axis(0)).insert_axis(Axis(1)))
    }

    /// Mean of each row, as a `num_rows() x 1` column vector.
    pub fn row_means(&self) -> DenseMatrix {
        let cols = self.num_cols() as f64;
        let mut sums = self.sum_rows();
        sums.divide_scalar_in_place(cols);
        sums
    }

    /// Mean of each column, as a `num_cols() x 1` column vector.
    pub fn col_means(&self) -> DenseMatrix {
        let rows = self.num_rows() as f64;
        let mut sums = self.sum_columns();
        sums.divide_scalar_in_place(rows);
        sums
    }

    /// Maps `function` over every element and returns the result as a new matrix.
    ///
    /// # Parameters
    ///
    /// * `function` - Scalar function applied independently to each element
    ///
    /// # Returns
    ///
    /// * `DenseMatrix` - A new matrix; `self` is not altered
    pub fn apply<F>(&self, function: F) -> DenseMatrix
    where
        F: Fn(f64) -> f64 + Sync + Send,
    {
        let mut result = self.clone();
        result.apply_in_place(function);
        result
    }

    /// *Mutates in place*. Maps `function` over every element.
    ///
    /// Large matrices are mapped in parallel; elements are independent so the
    /// result does not depend on scheduling.
    pub fn apply_in_place<F>(&mut self, function: F) -> &mut Self
    where
        F: Fn(f64) -> f64 + Sync + Send,
    {
        if self.data.len() >= PARALLEL_MAP_THRESHOLD {
            self.data.par_mapv_inplace(function);
        } else {
            self.data.mapv_inplace(function);
        }
        self
    }

    /// *Mutates in place*. Replaces every element, in row-major order, with the next
    /// value produced by `generator`. Used with an injected RNG, so it runs sequentially.
    pub fn fill_with<F>(&mut self, mut generator: F) -> &mut Self
    where
        F: FnMut() -> f64,
    {
        self.data.mapv_inplace(|_| generator());
        self
    }

    /// *Mutates in place*. Replaces every row with `function(row)`.
    ///
    /// Rows are processed in parallel. `function` must return a row of the same length.
    pub(crate) fn apply_to_rows_in_place<F>(&mut self, function: F) -> &mut Self
    where
        F: Fn(&mut [f64]) + Sync + Send,
    {
        self.data
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .for_each(|mut row| {
                if let Some(slice) = row.as_slice_mut() {
                    function(slice);
                } else {
                    let mut owned = row.to_vec();
                    function(&mut owned);
                    row.iter_mut().zip(owned).for_each(|(dst, src)| *dst = src);
                }
            });
        self
    }
}

impl PartialEq for DenseMatrix {
    /// Shapes must match and every pair of elements must be within `EQUALITY_TOLERANCE`.
    fn eq(&self, other: &Self) -> bool {
        self.abs_diff_eq(other, EQUALITY_TOLERANCE)
    }
}

impl AbsDiffEq for DenseMatrix {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        EQUALITY_TOLERANCE
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.shape() == other.shape() && self.data.abs_diff_eq(&other.data, epsilon)
    }
}

impl fmt::Display for DenseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data)
    }
}

impl From<Array2<f64>> for DenseMatrix {
    fn from(data: Array2<f64>) -> Self {
        Self::from_array(data)
    }
}
