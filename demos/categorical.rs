use std::{env,
          io::{BufWriter, Write},
          fs::File,
          error::Error};
use ndarray::{arr1, Array1};
use tracing_subscriber::EnvFilter;
use categorical_colormap::{map_categorical, map_discrete_with, Colormap,
                           ColormapEntry, MapOptions, ProcessingMode, RGBA8,
                           apply};

type Err = Box<dyn Error>;

fn css_string(c: RGBA8) -> String {
    format!("rgba({}, {}, {}, {:.3})", c.r, c.g, c.b, c.a as f64 / 255.)
}

fn table_of_colors(fh: &mut impl Write, colors: &[RGBA8],
                   width: u32, comment: &str) -> Result<(), Err> {
    writeln!(fh, "<table style=\"border: 0px;  border-spacing: 0px\"><tr>")?;
    for &c in colors {
        writeln!(fh, "  <td style=\"width: {width}px; height: 30px; \
                      background-color: {}\"></td>",
                 css_string(c))?;
    }
    writeln!(fh, "<td style=\"padding-left: 7px\">{comment}</td>\
                  </tr></table><br/>")?;
    Ok(())
}

/// Pseudo-random class labels in `0 .. n`, with a few out-of-range
/// codes to show the fallback color.
fn labels(len: usize, n: i32) -> Array1<i32> {
    let mut x: u32 = 2463534242;
    Array1::from_shape_fn(len, |_| {
        x ^= x << 13;  x ^= x >> 17;  x ^= x << 5;
        (x % (n as u32 + 2)) as i32
    })
}

fn main() -> Result<(), Err> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut fh = BufWriter::new(File::create("categorical.html")?);
    writeln!(fh, "<html>\n\
                  <head>\n\
                  <title>Categorical colormap: test {}</title>\n\
                  </head>\n\
                  <body>",
             env::args().next().unwrap_or_default())?;

    let palette = [RGBA8::new(228, 26, 28, 255), RGBA8::new(55, 126, 184, 255),
                   RGBA8::new(77, 175, 74, 255), RGBA8::new(152, 78, 163, 255),
                   RGBA8::new(255, 127, 0, 255)];
    let entries: Array1<_> = palette.iter().enumerate()
        .map(|(i, &c)| ColormapEntry::new(i as i32, c))
        .collect();

    writeln!(fh, "<h3>Categories</h3>")?;
    let data = labels(60, palette.len() as i32);
    let colors = map_categorical(data.view().into_dyn(),
                                 entries.view().into_dyn(), None)?;
    table_of_colors(&mut fh, &colors, 13, "transparent fallback")?;
    let grey = RGBA8::new(128, 128, 128, 255);
    let colors = map_categorical(data.view().into_dyn(),
                                 entries.view().into_dyn(), Some(grey))?;
    table_of_colors(&mut fh, &colors, 13, "grey fallback")?;

    writeln!(fh, "<h3>Last entry wins</h3>")?;
    let cmap: Colormap<i32> = [(0, palette[0]), (0, palette[1])]
        .into_iter().collect();
    let colors = apply(&[0, 1, 0], &cmap, grey);
    table_of_colors(&mut fh, &colors, 43, "0 → red, then 0 → blue")?;

    writeln!(fh, "<h3>Discrete, parallel</h3>")?;
    let data = labels(1 << 20, 3);
    let values = arr1(&[0i32, 1, 2]);
    let rgba = ndarray::arr2(&[[27u8, 158, 119, 255], [217, 95, 2, 255],
                               [117, 112, 179, 255]]);
    let options = MapOptions::new().fallback(grey)
        .mode(ProcessingMode::Parallel);
    let out = map_discrete_with(data.view().into_dyn(), values.view().into_dyn(),
                                rgba.view().into_dyn(), &options)?;
    let head: Vec<RGBA8> = out.rows().into_iter().take(150)
        .map(|r| RGBA8::new(r[0], r[1], r[2], r[3]))
        .collect();
    table_of_colors(&mut fh, &head, 1,
                    &format!("first 150 of {} pixels", out.nrows()))?;

    writeln!(fh, "</body>\n\
                  </html>")?;
    Ok(())
}
