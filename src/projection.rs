//! British National Grid (EPSG:27700) to WGS84 (EPSG:4326) conversion.
//!
//! Grid coordinates are Transverse Mercator on the Airy 1830 ellipsoid
//! (OSGB36 datum). Moving to WGS84 goes through earth-centred cartesian
//! coordinates and a 7-parameter Helmert transform, matching the
//! `+towgs84` parameters PROJ ships for EPSG:27700. Accuracy is a few
//! metres, which is plenty for plotting sites on a web map.

/// Semi-axes of an ellipsoid in metres.
#[derive(Debug, Clone, Copy)]
struct Ellipsoid {
    a: f64,
    b: f64,
}

impl Ellipsoid {
    fn e2(&self) -> f64 {
        1.0 - (self.b * self.b) / (self.a * self.a)
    }
}

const AIRY_1830: Ellipsoid = Ellipsoid {
    a: 6_377_563.396,
    b: 6_356_256.909,
};

const WGS84: Ellipsoid = Ellipsoid {
    a: 6_378_137.0,
    b: 6_356_752.314_245,
};

/// Central meridian scale factor of the National Grid.
const F0: f64 = 0.999_601_271_7;
/// True origin latitude (degrees).
const LAT0_DEG: f64 = 49.0;
/// True origin longitude (degrees).
const LON0_DEG: f64 = -2.0;
/// False easting of the true origin (metres).
const E0: f64 = 400_000.0;
/// False northing of the true origin (metres).
const N0: f64 = -100_000.0;

/// Position-vector Helmert parameters taking OSGB36 to WGS84.
#[derive(Debug, Clone, Copy)]
struct Helmert {
    tx: f64,
    ty: f64,
    tz: f64,
    /// Rotations in arc-seconds.
    rx: f64,
    ry: f64,
    rz: f64,
    /// Scale in parts per million.
    s_ppm: f64,
}

impl Helmert {
    fn inverse(self) -> Self {
        Self {
            tx: -self.tx,
            ty: -self.ty,
            tz: -self.tz,
            rx: -self.rx,
            ry: -self.ry,
            rz: -self.rz,
            s_ppm: -self.s_ppm,
        }
    }

    fn apply(&self, (x, y, z): (f64, f64, f64)) -> (f64, f64, f64) {
        let arcsec = std::f64::consts::PI / (180.0 * 3600.0);
        let (rx, ry, rz) = (self.rx * arcsec, self.ry * arcsec, self.rz * arcsec);
        let s1 = 1.0 + self.s_ppm * 1e-6;
        (
            self.tx + s1 * x - rz * y + ry * z,
            self.ty + rz * x + s1 * y - rx * z,
            self.tz - ry * x + rx * y + s1 * z,
        )
    }
}

const OSGB36_TO_WGS84: Helmert = Helmert {
    tx: 446.448,
    ty: -125.157,
    tz: 542.060,
    rx: 0.1502,
    ry: 0.2470,
    rz: 0.8421,
    s_ppm: -20.4894,
};

/// Converts National Grid easting/northing (metres) to WGS84 `(lon, lat)`
/// in degrees.
///
/// Inputs far outside Great Britain still produce numbers, but they may be
/// non-finite or out of range; callers validate the result.
///
/// # Examples
///
/// ```
/// use wind_planning_map::projection::osgb36_grid_to_wgs84;
///
/// let (lon, lat) = osgb36_grid_to_wgs84(400_000.0, -100_000.0);
/// assert!((lat - 49.0).abs() < 0.01);
/// assert!((lon + 2.0).abs() < 0.01);
/// ```
pub fn osgb36_grid_to_wgs84(easting: f64, northing: f64) -> (f64, f64) {
    let (lat, lon) = grid_to_geodetic(easting, northing);
    let cart = geodetic_to_cartesian(lat, lon, &AIRY_1830);
    let moved = OSGB36_TO_WGS84.apply(cart);
    let (lat, lon) = cartesian_to_geodetic(moved, &WGS84);
    (lon.to_degrees(), lat.to_degrees())
}

/// Converts WGS84 `(lon, lat)` in degrees to National Grid easting/northing.
pub fn wgs84_to_osgb36_grid(lon: f64, lat: f64) -> (f64, f64) {
    let cart = geodetic_to_cartesian(lat.to_radians(), lon.to_radians(), &WGS84);
    let moved = OSGB36_TO_WGS84.inverse().apply(cart);
    let (lat, lon) = cartesian_to_geodetic(moved, &AIRY_1830);
    geodetic_to_grid(lat, lon)
}

/// Meridional arc from the true origin latitude to `lat` (radians).
fn meridional_arc(lat: f64) -> f64 {
    let Ellipsoid { a, b } = AIRY_1830;
    let n = (a - b) / (a + b);
    let (n2, n3) = (n * n, n * n * n);
    let lat0 = LAT0_DEG.to_radians();
    let dlat = lat - lat0;
    let slat = lat + lat0;

    b * F0
        * ((1.0 + n + 1.25 * n2 + 1.25 * n3) * dlat
            - (3.0 * n + 3.0 * n2 + 2.625 * n3) * dlat.sin() * slat.cos()
            + (1.875 * n2 + 1.875 * n3) * (2.0 * dlat).sin() * (2.0 * slat).cos()
            - (35.0 / 24.0) * n3 * (3.0 * dlat).sin() * (3.0 * slat).cos())
}

/// Radii of curvature `(nu, rho, eta2)` at `lat` on the grid ellipsoid.
fn curvature(lat: f64) -> (f64, f64, f64) {
    let e2 = AIRY_1830.e2();
    let sin2 = lat.sin().powi(2);
    let nu = AIRY_1830.a * F0 / (1.0 - e2 * sin2).sqrt();
    let rho = AIRY_1830.a * F0 * (1.0 - e2) / (1.0 - e2 * sin2).powf(1.5);
    (nu, rho, nu / rho - 1.0)
}

fn grid_to_geodetic(easting: f64, northing: f64) -> (f64, f64) {
    let lat0 = LAT0_DEG.to_radians();
    let lon0 = LON0_DEG.to_radians();

    let mut lat = (northing - N0) / (AIRY_1830.a * F0) + lat0;
    let mut m = meridional_arc(lat);
    // Converges to 0.01 mm in a handful of steps inside the grid.
    for _ in 0..64 {
        if (northing - N0 - m).abs() < 1e-5 {
            break;
        }
        lat += (northing - N0 - m) / (AIRY_1830.a * F0);
        m = meridional_arc(lat);
    }

    let (nu, rho, eta2) = curvature(lat);
    let tan = lat.tan();
    let (t2, t4, t6) = (tan * tan, tan.powi(4), tan.powi(6));
    let sec = 1.0 / lat.cos();

    let vii = tan / (2.0 * rho * nu);
    let viii = tan / (24.0 * rho * nu.powi(3)) * (5.0 + 3.0 * t2 + eta2 - 9.0 * t2 * eta2);
    let ix = tan / (720.0 * rho * nu.powi(5)) * (61.0 + 90.0 * t2 + 45.0 * t4);
    let x = sec / nu;
    let xi = sec / (6.0 * nu.powi(3)) * (nu / rho + 2.0 * t2);
    let xii = sec / (120.0 * nu.powi(5)) * (5.0 + 28.0 * t2 + 24.0 * t4);
    let xiia = sec / (5040.0 * nu.powi(7)) * (61.0 + 662.0 * t2 + 1320.0 * t4 + 720.0 * t6);

    let de = easting - E0;
    let lat_out = lat - vii * de.powi(2) + viii * de.powi(4) - ix * de.powi(6);
    let lon_out = lon0 + x * de - xi * de.powi(3) + xii * de.powi(5) - xiia * de.powi(7);
    (lat_out, lon_out)
}

fn geodetic_to_grid(lat: f64, lon: f64) -> (f64, f64) {
    let lon0 = LON0_DEG.to_radians();
    let (nu, rho, eta2) = curvature(lat);
    let (sin, cos) = lat.sin_cos();
    let tan = lat.tan();
    let t2 = tan * tan;
    let t4 = t2 * t2;

    let i = meridional_arc(lat) + N0;
    let ii = nu / 2.0 * sin * cos;
    let iii = nu / 24.0 * sin * cos.powi(3) * (5.0 - t2 + 9.0 * eta2);
    let iiia = nu / 720.0 * sin * cos.powi(5) * (61.0 - 58.0 * t2 + t4);
    let iv = nu * cos;
    let v = nu / 6.0 * cos.powi(3) * (nu / rho - t2);
    let vi = nu / 120.0 * cos.powi(5) * (5.0 - 18.0 * t2 + t4 + 14.0 * eta2 - 58.0 * t2 * eta2);

    let dl = lon - lon0;
    let northing = i + ii * dl.powi(2) + iii * dl.powi(4) + iiia * dl.powi(6);
    let easting = E0 + iv * dl + v * dl.powi(3) + vi * dl.powi(5);
    (easting, northing)
}

/// Height is taken as zero on the source ellipsoid.
fn geodetic_to_cartesian(lat: f64, lon: f64, ell: &Ellipsoid) -> (f64, f64, f64) {
    let e2 = ell.e2();
    let (sin_lat, cos_lat) = lat.sin_cos();
    let nu = ell.a / (1.0 - e2 * sin_lat * sin_lat).sqrt();
    (
        nu * cos_lat * lon.cos(),
        nu * cos_lat * lon.sin(),
        (1.0 - e2) * nu * sin_lat,
    )
}

fn cartesian_to_geodetic((x, y, z): (f64, f64, f64), ell: &Ellipsoid) -> (f64, f64) {
    let e2 = ell.e2();
    let p = (x * x + y * y).sqrt();
    let lon = y.atan2(x);
    let mut lat = z.atan2(p * (1.0 - e2));
    for _ in 0..32 {
        let sin_lat = lat.sin();
        let nu = ell.a / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        let next = (z + e2 * nu * sin_lat).atan2(p);
        if (next - lat).abs() < 1e-12 {
            lat = next;
            break;
        }
        lat = next;
    }
    (lat, lon)
}
