use pictor::{ImageContext, ImageError, SubImageId};

#[test]
fn test_bind_points_at_base_sub_image() {
    let mut ctx = ImageContext::new().unwrap();
    let h = ctx.gen_image().unwrap();
    ctx.bind(h).unwrap();
    assert_eq!(ctx.cur_name(), h);
    assert_eq!(ctx.cur_id(), SubImageId::ZERO);
}

#[test]
fn test_fresh_handle_has_only_the_base_entry() {
    let mut ctx = ImageContext::new().unwrap();
    let h = ctx.gen_image().unwrap();
    let set = ctx.image_set(h).unwrap();
    assert_eq!(set.len(), 1);
    assert_eq!(set.find(SubImageId::ZERO), Some(0));
    assert_eq!(set.extents(), SubImageId::ZERO);
}

#[test]
fn test_mipmap_walk_materializes_entries() {
    let mut ctx = ImageContext::new().unwrap();
    let h = ctx.gen_image().unwrap();
    ctx.bind(h).unwrap();

    ctx.active_mipmap(1).unwrap();
    assert_eq!(ctx.cur_id(), SubImageId::new(0, 1, 0, 0));
    let set = ctx.image_set(h).unwrap();
    assert_eq!(set.len(), 2);
    assert!(set.find(SubImageId::ZERO).is_some());
    assert!(set.find(SubImageId::new(0, 1, 0, 0)).is_some());
    assert_eq!(set.extents(), SubImageId::new(0, 1, 0, 0));

    // advance is relative to the cursor, so another step lands on level 2
    ctx.active_mipmap(1).unwrap();
    assert_eq!(ctx.cur_id(), SubImageId::new(0, 2, 0, 0));
    let set = ctx.image_set(h).unwrap();
    assert_eq!(set.len(), 3);
    assert_eq!(set.extents(), SubImageId::new(0, 2, 0, 0));
}

#[test]
fn test_zero_delta_re_resolves_without_creating() {
    let mut ctx = ImageContext::new().unwrap();
    let h = ctx.gen_image().unwrap();
    ctx.bind(h).unwrap();

    ctx.active_frame(2).unwrap();
    let at_two = ctx.cur_id();
    assert_eq!(ctx.image_set(h).unwrap().len(), 2);

    ctx.active_frame(0).unwrap();
    assert_eq!(ctx.cur_id(), at_two);
    // re-resolved the existing entry, no duplicate
    assert_eq!(ctx.image_set(h).unwrap().len(), 2);
}

#[test]
fn test_revisiting_an_address_reuses_the_node() {
    let mut ctx = ImageContext::new().unwrap();
    let h = ctx.gen_image().unwrap();
    ctx.bind(h).unwrap();

    ctx.active_layer(3).unwrap();
    let marker = 0xA7;
    ctx.cur_image_mut().unwrap().data[0] = marker;

    // walk away and back; the same node must be there
    ctx.bind(h).unwrap();
    assert_eq!(ctx.cur_id(), SubImageId::ZERO);
    ctx.active_layer(3).unwrap();
    assert_eq!(ctx.cur_image().unwrap().data[0], marker);
}

#[test]
fn test_axes_are_independent() {
    let mut ctx = ImageContext::new().unwrap();
    let h = ctx.gen_image().unwrap();
    ctx.bind(h).unwrap();

    ctx.active_frame(1).unwrap();
    ctx.active_mipmap(2).unwrap();
    ctx.active_face(1).unwrap();
    assert_eq!(ctx.cur_id(), SubImageId::new(1, 2, 0, 1));
}

#[test]
fn test_base_image_ignores_cursor_position() {
    let mut ctx = ImageContext::new().unwrap();
    let h = ctx.gen_image().unwrap();
    ctx.bind(h).unwrap();

    ctx.base_image().unwrap();
    ctx.active_frame(4).unwrap();
    assert_eq!(ctx.cur_id(), SubImageId::new(4, 0, 0, 0));
    // still resolves to the ZERO entry
    assert_eq!(ctx.base_image().unwrap().data.len(), 1);
}

#[test]
fn test_navigation_on_deleted_handle_fails_cleanly() {
    let mut ctx = ImageContext::new().unwrap();
    let h = ctx.gen_image().unwrap();
    ctx.bind(h).unwrap();
    ctx.active_frame(1).unwrap();
    let before = ctx.cur_id();

    ctx.delete_image(h).unwrap();
    assert!(matches!(
        ctx.active_frame(1),
        Err(ImageError::InvalidValue(_))
    ));
    // failed advance leaves the cursor key untouched
    assert_eq!(ctx.cur_id(), before);
}

#[test]
fn test_replace_cur_image_substitutes_in_place() {
    let mut ctx = ImageContext::new().unwrap();
    let h = ctx.gen_image().unwrap();
    ctx.bind(h).unwrap();
    ctx.active_mipmap(1).unwrap();

    let decoded = pictor::ImageNode::new(16, 16, 1, 4, 1).unwrap();
    ctx.replace_cur_image(decoded).unwrap();

    assert_eq!(ctx.cur_image().unwrap().data.len(), 16 * 16 * 4);
    // the base entry is untouched
    assert_eq!(ctx.base_image().unwrap().data.len(), 1);

    // re-navigating to the same address still finds the replacement
    ctx.bind(h).unwrap();
    ctx.active_mipmap(1).unwrap();
    assert_eq!(ctx.cur_image().unwrap().data.len(), 16 * 16 * 4);
}

#[test]
fn test_handles_keep_independent_grids() {
    let mut ctx = ImageContext::new().unwrap();
    let a = ctx.gen_image().unwrap();
    let b = ctx.gen_image().unwrap();

    ctx.bind(a).unwrap();
    ctx.active_frame(5).unwrap();

    ctx.bind(b).unwrap();
    assert_eq!(ctx.cur_id(), SubImageId::ZERO);
    ctx.active_frame(1).unwrap();
    assert_eq!(ctx.cur_id(), SubImageId::new(1, 0, 0, 0));

    ctx.bind(a).unwrap();
    ctx.active_frame(5).unwrap();
    assert_eq!(ctx.cur_id(), SubImageId::new(5, 0, 0, 0));
}
