use super::ScanError;

/// Upper bound for a single camera still; anything larger is a bug in the
/// capture layer, not a frame worth decoding
pub const MAX_FRAME_BYTES: usize = 8 * 1024 * 1024;

/// A PNG- or JPEG-encoded still grabbed from the camera preview
#[derive(Debug, Clone)]
pub struct CameraFrame {
    data: Vec<u8>,
}

impl CameraFrame {
    pub fn new(data: Vec<u8>) -> Result<Self, ScanError> {
        if data.is_empty() {
            return Err(ScanError::EmptyFrame);
        }
        if data.len() > MAX_FRAME_BYTES {
            return Err(ScanError::FrameTooLarge(data.len()));
        }
        Ok(Self { data })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_ordinary_frame() {
        let frame = CameraFrame::new(vec![1, 2, 3]).unwrap();
        assert_eq!(frame.data(), &[1, 2, 3]);
    }

    #[test]
    fn test_new_rejects_empty_frame() {
        assert!(matches!(
            CameraFrame::new(Vec::new()),
            Err(ScanError::EmptyFrame)
        ));
    }

    #[test]
    fn test_new_rejects_oversized_frame() {
        let data = vec![0u8; MAX_FRAME_BYTES + 1];
        assert!(matches!(
            CameraFrame::new(data),
            Err(ScanError::FrameTooLarge(_))
        ));
    }
}
