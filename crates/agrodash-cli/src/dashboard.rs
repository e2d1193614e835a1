//! Dashboard home statistics.
//!
//! Each figure comes from an independent request. The requests run
//! concurrently and a failed one only blanks its own figure.

use agrodash_core::client::{FarmClient, FertilizationClient, IrrigationClient, ParcelClient};
use agrodash_core::error::AgroResult;
use agrodash_core::models::farm::Farm;
use agrodash_core::models::fertilization::FertilizationStatus;
use futures::future::join_all;
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub farms: Option<usize>,
    pub parcels: Option<usize>,
    pub upcoming_irrigations: Option<usize>,
    pub scheduled_fertilizations: Option<usize>,
}

impl DashboardStats {
    pub async fn load<F, P, I, Z>(
        farms: &F,
        parcels: &P,
        irrigations: &I,
        fertilizations: &Z,
    ) -> Self
    where
        F: FarmClient,
        P: ParcelClient,
        I: IrrigationClient,
        Z: FertilizationClient,
    {
        let (farm_list, parcel_list, upcoming, scheduled) = tokio::join!(
            farms.list(),
            parcels.list(),
            irrigations.list_upcoming(),
            fertilizations.list_by_status(FertilizationStatus::Scheduled),
        );

        Self {
            farms: count("farms", farm_list),
            parcels: count("parcels", parcel_list),
            upcoming_irrigations: count("upcoming irrigations", upcoming),
            scheduled_fertilizations: count("scheduled fertilizations", scheduled),
        }
    }
}

fn count<T>(stat: &str, result: AgroResult<Vec<T>>) -> Option<usize> {
    match result {
        Ok(items) => Some(items.len()),
        Err(e) => {
            warn!(stat, error = %e, "Dashboard figure unavailable");
            None
        }
    }
}

/// Fill in `parcel_count` for every farm, keeping input order.
///
/// A farm whose lookup fails keeps whatever count it already had.
pub async fn parcel_counts<P: ParcelClient>(parcels: &P, farms: Vec<Farm>) -> Vec<Farm> {
    let lookups = join_all(farms.iter().map(|farm| parcels.list_by_farm(farm.id))).await;

    farms
        .into_iter()
        .zip(lookups)
        .map(|(mut farm, lookup)| {
            match lookup {
                Ok(list) => farm.parcel_count = Some(list.len() as u64),
                Err(e) => warn!(farm = farm.id, error = %e, "Parcel count unavailable"),
            }
            farm
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use agrodash_core::error::AgroError;
    use agrodash_core::models::farm::FarmRequest;
    use agrodash_core::models::fertilization::{
        Fertilization, FertilizationRequest, ScheduleFertilization,
    };
    use agrodash_core::models::irrigation::{Irrigation, IrrigationRequest, IrrigationStatus};
    use agrodash_core::models::parcel::{Parcel, ParcelRequest, ParcelWeather};
    use chrono::NaiveDate;

    use super::*;

    fn offline<T>() -> AgroResult<T> {
        Err(AgroError::Transport {
            status: None,
            message: None,
        })
    }

    fn farm(id: i64) -> Farm {
        Farm {
            id,
            name: format!("Farm {id}"),
            location: None,
            created_at: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            parcel_count: None,
        }
    }

    fn parcel(id: i64, farm_id: i64) -> Parcel {
        Parcel {
            id,
            name: format!("Parcel {id}"),
            latitude: None,
            longitude: None,
            area: None,
            last_irrigated_at: None,
            last_fertilized_at: None,
            farm_id,
            farm_name: None,
            crop_id: None,
            crop_name: None,
        }
    }

    /// Backend stand-in: two farms, three parcels, nothing scheduled.
    /// Farm 1's parcel lookup is the slowest; farm 3's fails.
    struct Fake {
        irrigations_down: bool,
    }

    impl FarmClient for Fake {
        async fn create(&self, _: FarmRequest) -> AgroResult<Farm> {
            unreachable!()
        }
        async fn list(&self) -> AgroResult<Vec<Farm>> {
            Ok(vec![farm(1), farm(2)])
        }
        async fn get_by_id(&self, _: i64) -> AgroResult<Farm> {
            unreachable!()
        }
        async fn update(&self, _: i64, _: FarmRequest) -> AgroResult<Farm> {
            unreachable!()
        }
        async fn delete(&self, _: i64) -> AgroResult<()> {
            unreachable!()
        }
    }

    impl ParcelClient for Fake {
        async fn create(&self, _: ParcelRequest) -> AgroResult<Parcel> {
            unreachable!()
        }
        async fn list(&self) -> AgroResult<Vec<Parcel>> {
            Ok(vec![parcel(10, 1), parcel(11, 1), parcel(20, 2)])
        }
        async fn get_by_id(&self, _: i64) -> AgroResult<Parcel> {
            unreachable!()
        }
        async fn update(&self, _: i64, _: ParcelRequest) -> AgroResult<Parcel> {
            unreachable!()
        }
        async fn delete(&self, _: i64) -> AgroResult<()> {
            unreachable!()
        }
        async fn list_by_farm(&self, farm_id: i64) -> AgroResult<Vec<Parcel>> {
            match farm_id {
                1 => {
                    tokio::time::sleep(Duration::from_millis(30)).await;
                    Ok(vec![parcel(10, 1), parcel(11, 1)])
                }
                2 => Ok(vec![parcel(20, 2)]),
                _ => offline(),
            }
        }
        async fn list_by_crop(&self, _: i64) -> AgroResult<Vec<Parcel>> {
            unreachable!()
        }
        async fn weather(&self, _: i64) -> AgroResult<ParcelWeather> {
            unreachable!()
        }
    }

    impl IrrigationClient for Fake {
        async fn create(&self, _: IrrigationRequest) -> AgroResult<Irrigation> {
            unreachable!()
        }
        async fn list(&self) -> AgroResult<Vec<Irrigation>> {
            unreachable!()
        }
        async fn get_by_id(&self, _: i64) -> AgroResult<Irrigation> {
            unreachable!()
        }
        async fn update(&self, _: i64, _: IrrigationRequest) -> AgroResult<Irrigation> {
            unreachable!()
        }
        async fn delete(&self, _: i64) -> AgroResult<()> {
            unreachable!()
        }
        async fn list_by_parcel(&self, _: i64) -> AgroResult<Vec<Irrigation>> {
            unreachable!()
        }
        async fn list_by_status(&self, _: IrrigationStatus) -> AgroResult<Vec<Irrigation>> {
            unreachable!()
        }
        async fn list_upcoming(&self) -> AgroResult<Vec<Irrigation>> {
            if self.irrigations_down {
                offline()
            } else {
                Ok(Vec::new())
            }
        }
        async fn update_status(&self, _: i64, _: IrrigationStatus) -> AgroResult<Irrigation> {
            unreachable!()
        }
        async fn execute(&self, _: i64) -> AgroResult<String> {
            unreachable!()
        }
        async fn stop(&self, _: i64) -> AgroResult<String> {
            unreachable!()
        }
    }

    impl FertilizationClient for Fake {
        async fn create(&self, _: FertilizationRequest) -> AgroResult<Fertilization> {
            unreachable!()
        }
        async fn schedule(&self, _: ScheduleFertilization) -> AgroResult<Fertilization> {
            unreachable!()
        }
        async fn list(&self) -> AgroResult<Vec<Fertilization>> {
            unreachable!()
        }
        async fn get_by_id(&self, _: i64) -> AgroResult<Fertilization> {
            unreachable!()
        }
        async fn update(&self, _: i64, _: FertilizationRequest) -> AgroResult<Fertilization> {
            unreachable!()
        }
        async fn delete(&self, _: i64) -> AgroResult<()> {
            unreachable!()
        }
        async fn list_by_parcel(&self, _: i64) -> AgroResult<Vec<Fertilization>> {
            unreachable!()
        }
        async fn list_by_status(&self, _: FertilizationStatus) -> AgroResult<Vec<Fertilization>> {
            Ok(Vec::new())
        }
        async fn list_by_status_for_user(
            &self,
            _: FertilizationStatus,
        ) -> AgroResult<Vec<Fertilization>> {
            unreachable!()
        }
        async fn complete(&self, _: i64, _: Option<String>) -> AgroResult<Fertilization> {
            unreachable!()
        }
        async fn cancel(&self, _: i64, _: Option<String>) -> AgroResult<Fertilization> {
            unreachable!()
        }
        async fn update_status(
            &self,
            _: i64,
            _: FertilizationStatus,
        ) -> AgroResult<Fertilization> {
            unreachable!()
        }
    }

    #[tokio::test]
    async fn loads_every_figure() {
        let fake = Fake {
            irrigations_down: false,
        };
        let stats = DashboardStats::load(&fake, &fake, &fake, &fake).await;
        assert_eq!(
            stats,
            DashboardStats {
                farms: Some(2),
                parcels: Some(3),
                upcoming_irrigations: Some(0),
                scheduled_fertilizations: Some(0),
            }
        );
    }

    #[tokio::test]
    async fn failed_figure_does_not_blank_the_others() {
        let fake = Fake {
            irrigations_down: true,
        };
        let stats = DashboardStats::load(&fake, &fake, &fake, &fake).await;
        assert_eq!(stats.upcoming_irrigations, None);
        assert_eq!(stats.farms, Some(2));
        assert_eq!(stats.scheduled_fertilizations, Some(0));
    }

    #[tokio::test]
    async fn parcel_counts_keep_input_order() {
        let fake = Fake {
            irrigations_down: false,
        };
        let farms = parcel_counts(&fake, vec![farm(1), farm(2), farm(3)]).await;

        let counts: Vec<_> = farms.iter().map(|f| (f.id, f.parcel_count)).collect();
        assert_eq!(counts, vec![(1, Some(2)), (2, Some(1)), (3, None)]);
    }
}
