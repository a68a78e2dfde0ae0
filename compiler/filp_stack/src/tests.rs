use super::*;

#[test]
fn nested_blocks_recurse_without_overflow() {
    // one frame per `{` nesting level, as the executor does
    fn run_block(depth: u32) -> u32 {
        ensure_sufficient_stack(|| {
            let mut token = [0u8; 256];
            token[0] = b'{';
            if depth == 0 {
                u32::from(token[0] == b'{')
            } else {
                run_block(depth - 1) + u32::from(token[0] == b'{')
            }
        })
    }

    assert_eq!(run_block(100_000), 100_001);
}

#[test]
fn status_is_passed_through() {
    #[derive(Debug, PartialEq)]
    enum Status {
        Ok,
        Break,
    }

    assert_eq!(ensure_sufficient_stack(|| Status::Break), Status::Break);
    assert_eq!(ensure_sufficient_stack(|| Status::Ok), Status::Ok);
}

#[test]
fn grown_segment_leaves_room() {
    let remaining = ensure_sufficient_stack(remaining_stack);
    if let Some(bytes) = remaining {
        assert!(bytes >= RED_ZONE);
    }
}
