use super::Tensor;
use std::fmt;

impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "形状: {:?}", self.shape())?;
        if self.dimension() != 2 {
            return writeln!(f, "{}", self.data);
        }

        let (rows, cols) = (self.shape()[0], self.shape()[1]);
        let row_ids: Vec<usize> = if rows > 6 {
            (0..3).chain(rows - 3..rows).collect()
        } else {
            (0..rows).collect()
        };
        let col_ids: Vec<usize> = if cols > 6 {
            (0..3).chain(cols - 3..cols).collect()
        } else {
            (0..cols).collect()
        };

        for (ri, &i) in row_ids.iter().enumerate() {
            if rows > 6 && ri == 3 {
                writeln!(f, " ..")?;
            }
            for (ci, &j) in col_ids.iter().enumerate() {
                if cols > 6 && ci == 3 {
                    write!(f, "   ..  ")?;
                }
                write!(f, "{:8.4} ", self[[i, j]])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
