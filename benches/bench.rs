use criterion::{black_box, criterion_group, criterion_main, Criterion};
use solid_scene::*;

fn demo_solids() -> [Solid; 3] {
   [
      Solid::new(320, 320, 64, 64),
      Solid::new(256, 336, 32, 32),
      Solid::new(200, 320, 32, 32).with_vel(0, 1),
   ]
}
fn demo_segments() -> [Segment; 2] {
   [
      Segment::platform(224, 224, 32).with_vel(0, 1),
      Segment::new(288, 212, 32, Orientation::Vertical, true, false),
   ]
}

fn criterion_benchmark(c: &mut Criterion) {
   c.bench_function("demo level tick", |b| {
      let mut solids = demo_solids();
      let mut segments = demo_segments();
      let mut actors = [Actor::new(256.0, 298.0, 11, 21)];
      let mut scene = Scene::new(Gravity::Down, &mut solids, &mut segments, &mut actors).unwrap();
      let mut player = Player::new(0, Tuning::default());
      let mut tick = 0u32;
      b.iter(|| {
         // back and forth, hopping every so often
         let input = Input {
            horizontal: if tick / 40 % 2 == 0 { 1 } else { -1 },
            jump_pressed: tick % 25 == 0,
            jump_released: tick % 25 == 10,
         };
         player.steer(&mut scene, black_box(&input));
         scene.update();
         tick = tick.wrapping_add(1);
      })
   });

   c.bench_function("crowded projection", |b| {
      let mut solids: Vec<Solid> = (0..64).map(|i| Solid::new(i * 40, 300 - i % 5 * 8, 32, 32)).collect();
      let mut segments: Vec<Segment> = (0..32).map(|i| Segment::platform(i * 80, 200, 48)).collect();
      let mut actors = [Actor::new(600.5, 100.25, 11, 21)];
      let scene = Scene::new(Gravity::Down, &mut solids, &mut segments, &mut actors).unwrap();
      b.iter(|| {
         let actor = black_box(&scene.actors()[0]);
         Direction::ALL.iter().map(|&dir| scene.project_free(actor, dir)).sum::<Fp>()
      })
   });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
