//! The HTML that turns the packed PNG back into a running script.
//!
//! When the output file is opened as an HTML page the browser skips the
//! binary noise, finds the `<canvas>` and `<img>` markup stored in the custom
//! chunk, and loads the file itself (`src=#`) as the image. The `onload`
//! handler draws the image to the canvas, reads the grayscale pixel values
//! back as character codes, and evaluates the result in global scope.
//!
//! Both bootstraps are p01's, with gasman's edits: `drawImage` is moved out of
//! the `getImageData` arguments and `eval` is called as `(1,eval)`.

use std::borrow::Cow;

/// Bootstrap for a one row image.
///
/// Reads one pixel at a time by drawing the image shifted left by `p` pixels,
/// until it finds a zero pixel. Requires a zero sentinel after the script.
pub const SINGLE_ROW_BOOTSTRAP: &str = "<canvas id=c><img onload=with(c.getContext('2d'))for(p=e='';drawImage(this,p--,0),t=getImageData(0,0,1,1).data[0];)e+=String.fromCharCode(t);(1,eval)(e) src=#>";

/// Bootstrap text up to the image height.
const MULTI_ROW_BOOTSTRAP_HEAD: &str = "<canvas id=c><img onload=for(w=c.width=4096,a=c.getContext('2d'),a.drawImage(this,p=0,0),e='',d=a.getImageData(0,0,w,";

/// Bootstrap text after the image height.
const MULTI_ROW_BOOTSTRAP_TAIL: &str =
  ").data;t=d[p+=4];)e+=String.fromCharCode(t);(1,eval)(e) src=#>";

/// Builds the bootstrap for an image of the given height.
///
/// A height of 1 gets [`SINGLE_ROW_BOOTSTRAP`] as is. Anything taller gets the
/// multi-row bootstrap with `height` written in as a decimal literal. That
/// bootstrap pre-increments its read offset, which is why a multi-row layout
/// reserves the first pixel.
#[must_use]
pub fn bootstrap_for_height(height: u32) -> Cow<'static, str> {
  if height == 1 {
    Cow::Borrowed(SINGLE_ROW_BOOTSTRAP)
  } else {
    Cow::Owned(format!("{MULTI_ROW_BOOTSTRAP_HEAD}{height}{MULTI_ROW_BOOTSTRAP_TAIL}"))
  }
}

#[test]
fn test_multi_row_bootstrap_width_matches_layout() {
  use crate::layout::MAX_ROW_WIDTH;
  let width = format!("c.width={MAX_ROW_WIDTH},");
  assert!(MULTI_ROW_BOOTSTRAP_HEAD.contains(&width));
}

#[test]
fn test_bootstrap_for_height() {
  assert_eq!(bootstrap_for_height(1), SINGLE_ROW_BOOTSTRAP);
  let two = bootstrap_for_height(2);
  assert!(two.contains("getImageData(0,0,w,2).data"));
  assert!(bootstrap_for_height(1234).contains("getImageData(0,0,w,1234).data"));
  assert_eq!(two.len(), MULTI_ROW_BOOTSTRAP_HEAD.len() + 1 + MULTI_ROW_BOOTSTRAP_TAIL.len());
}
