use core::fmt;

use crate::layout::LayoutMode;

/// Sizes from one packing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompressionStatistics {
  /// bytes of script that went in
  pub script_size: usize,
  /// bytes of PNG that came out
  pub png_size: usize,
  /// the layout the script ended up in
  pub mode: LayoutMode,
}
impl CompressionStatistics {
  /// Output size as a percentage of the input size.
  ///
  /// `None` for an empty script.
  #[inline]
  #[must_use]
  pub fn png_percent_of_script(&self) -> Option<f64> {
    if self.script_size == 0 {
      None
    } else {
      Some(self.png_size as f64 / self.script_size as f64 * 100.0)
    }
  }
}
impl fmt::Display for CompressionStatistics {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let rows = match self.mode {
      LayoutMode::SingleRow => "single row",
      LayoutMode::MultiRow => "multiple rows",
    };
    writeln!(f, "Embedded image has {rows}")?;
    writeln!(f, "Input script size: {} bytes", self.script_size)?;
    write!(f, "Output PNG file size: {} bytes", self.png_size)?;
    if let Some(percent) = self.png_percent_of_script() {
      write!(f, "\nPNG is {percent:.2} percent of script")?;
    }
    Ok(())
  }
}

#[test]
fn test_statistics_display() {
  let stats = CompressionStatistics { script_size: 200, png_size: 150, mode: LayoutMode::SingleRow };
  assert_eq!(
    stats.to_string(),
    "Embedded image has single row\nInput script size: 200 bytes\nOutput PNG file size: 150 bytes\nPNG is 75.00 percent of script"
  );
  let empty = CompressionStatistics { script_size: 0, png_size: 90, mode: LayoutMode::SingleRow };
  assert_eq!(empty.png_percent_of_script(), None);
  assert!(empty.to_string().ends_with("90 bytes"));
}
