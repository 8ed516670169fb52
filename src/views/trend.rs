//! Trend View
//!
//! Fetches the monthly attrition series and turns it into a chart model.

use std::rc::Rc;

use crate::api::AttritionApi;
use crate::model::TrendPoint;
use crate::query::{QueryClient, QueryKey, QuerySnapshot};

/// Cache key for the attrition time series
pub const ATTRITION_TRENDS_KEY: QueryKey = QueryKey::from_static("attritionTrends");

/// Height reserved for the chart while data is loading
pub const TREND_PLACEHOLDER_HEIGHT_PX: u32 = 300;

/// One plotted point: x = month label, y = rate
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// Ordered line series, in fetch order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrendSeries {
    pub points: Vec<ChartPoint>,
}

impl TrendSeries {
    pub fn from_points(points: &[TrendPoint]) -> Self {
        Self {
            points: points
                .iter()
                .map(|p| ChartPoint {
                    label: p.month.clone(),
                    value: p.rate,
                })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `(min, max)` of the values, padded so a flat series still has height
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let min = self.points.iter().map(|p| p.value).fold(f64::INFINITY, f64::min);
        let max = self.points.iter().map(|p| p.value).fold(f64::NEG_INFINITY, f64::max);
        if !min.is_finite() || !max.is_finite() {
            return None;
        }

        let range = max - min;
        let padding = if range > 0.0 { range * 0.1 } else { 1.0 };
        Some((min - padding, max + padding))
    }
}

/// What the trend panel shows
#[derive(Debug, Clone, PartialEq)]
pub enum TrendRender {
    /// Fixed-size placeholder while the first load is pending
    Placeholder { height_px: u32 },
    Chart(TrendSeries),
    /// Load failed and there is nothing cached to fall back on
    Error(String),
}

/// Build the render model from a query snapshot
pub fn render_trend(snapshot: &QuerySnapshot<Vec<TrendPoint>>) -> TrendRender {
    match (&snapshot.data, &snapshot.error) {
        (Some(points), _) => TrendRender::Chart(TrendSeries::from_points(points)),
        (None, Some(err)) if snapshot.is_error() => {
            TrendRender::Error(format!("Could not load attrition trends: {}", err))
        }
        _ => TrendRender::Placeholder {
            height_px: TREND_PLACEHOLDER_HEIGHT_PX,
        },
    }
}

/// Trend panel: no local state beyond the query cache
pub struct TrendView<A: ?Sized> {
    api: Rc<A>,
    cache: QueryClient,
}

impl<A: ?Sized> Clone for TrendView<A> {
    fn clone(&self) -> Self {
        Self {
            api: Rc::clone(&self.api),
            cache: self.cache.clone(),
        }
    }
}

impl<A: AttritionApi + ?Sized + 'static> TrendView<A> {
    pub fn new(api: Rc<A>, cache: QueryClient) -> Self {
        Self { api, cache }
    }

    /// Issue the trends query (served from cache when already loaded)
    pub async fn mount(&self) -> QuerySnapshot<Vec<TrendPoint>> {
        let api = Rc::clone(&self.api);
        self.cache
            .fetch_query(ATTRITION_TRENDS_KEY, move || async move {
                api.fetch_attrition_trends().await
            })
            .await
    }

    pub async fn refetch(&self) -> QuerySnapshot<Vec<TrendPoint>> {
        let api = Rc::clone(&self.api);
        self.cache
            .refetch(ATTRITION_TRENDS_KEY, move || async move {
                api.fetch_attrition_trends().await
            })
            .await
    }

    pub fn snapshot(&self) -> QuerySnapshot<Vec<TrendPoint>> {
        self.cache.snapshot(ATTRITION_TRENDS_KEY)
    }

    pub fn render(&self) -> TrendRender {
        render_trend(&self.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::views::fake::FakeApi;

    #[tokio::test]
    async fn test_placeholder_before_data() {
        let view = TrendView::new(Rc::new(FakeApi::default()), QueryClient::new());
        assert_eq!(
            view.render(),
            TrendRender::Placeholder {
                height_px: TREND_PLACEHOLDER_HEIGHT_PX
            }
        );
    }

    #[tokio::test]
    async fn test_chart_keeps_fetch_order() {
        let api = Rc::new(FakeApi::default());
        let view = TrendView::new(Rc::clone(&api), QueryClient::new());

        view.mount().await;

        let TrendRender::Chart(series) = view.render() else {
            panic!("expected chart");
        };
        let labels: Vec<_> = series.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Jan", "Feb", "Mar"]);
        assert_eq!(series.points[1].value, 9.0);
        assert_eq!(api.trend_calls(), 1);
    }

    #[tokio::test]
    async fn test_mount_twice_uses_cache() {
        let api = Rc::new(FakeApi::default());
        let view = TrendView::new(Rc::clone(&api), QueryClient::new());

        view.mount().await;
        view.mount().await;
        assert_eq!(api.trend_calls(), 1);

        view.refetch().await;
        assert_eq!(api.trend_calls(), 2);
    }

    #[tokio::test]
    async fn test_error_render() {
        let api = Rc::new(FakeApi::default());
        api.fail_trends(ApiError::Unavailable);
        let view = TrendView::new(Rc::clone(&api), QueryClient::new());

        view.mount().await;
        assert_eq!(
            view.render(),
            TrendRender::Error(
                "Could not load attrition trends: Analytics service unavailable".to_string()
            )
        );
    }

    #[test]
    fn test_value_range() {
        let series = TrendSeries::from_points(&[
            TrendPoint { month: "Jan".into(), rate: 10.0 },
            TrendPoint { month: "Feb".into(), rate: 20.0 },
        ]);
        assert_eq!(series.value_range(), Some((9.0, 21.0)));

        let flat = TrendSeries::from_points(&[TrendPoint { month: "Jan".into(), rate: 5.0 }]);
        assert_eq!(flat.value_range(), Some((4.0, 6.0)));

        assert_eq!(TrendSeries::default().value_range(), None);
    }
}
